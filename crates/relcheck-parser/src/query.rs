//! Read-only relationship queries for report and code generators.
//!
//! [`RelQuery`] answers "which properties are keys" style questions by
//! delegating to a [`RelParser`]; it adds no validation of its own. Invalid
//! annotations simply do not count as keys. Elements are borrowed from the
//! queried document for as long as the query lives.

use relcheck_core::schema::{Annotated, Method, Parameter, Property, Service, Type};

use crate::{descriptor::ForeignKey, rel::RelParser};

/// Relationship lookups over one document.
#[derive(Debug)]
pub struct RelQuery<'a> {
    parser: RelParser<'a>,
}

impl<'a> RelQuery<'a> {
    pub fn new(service: &'a Service) -> Self {
        Self::from_parser(RelParser::new(service))
    }

    /// Reuse an existing session and its cache.
    pub fn from_parser(parser: RelParser<'a>) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &RelParser<'a> {
        &self.parser
    }

    /// Properties of `ty` that are valid primary keys.
    pub fn primary_keys(&self, ty: &'a Type) -> Vec<&'a Property> {
        ty.properties()
            .iter()
            .filter(|prop| self.parser.is_primary_key(*prop))
            .collect()
    }

    /// Properties of `ty` that are valid foreign keys.
    pub fn foreign_keys(&self, ty: &'a Type) -> Vec<&'a Property> {
        ty.properties()
            .iter()
            .filter(|prop| self.parser.is_foreign_key(*prop))
            .collect()
    }

    /// Parameters of `method` that are valid foreign keys.
    pub fn key_parameters(&self, method: &'a Method) -> Vec<&'a Parameter> {
        method
            .parameters()
            .iter()
            .filter(|param| self.parser.is_foreign_key(*param))
            .collect()
    }

    pub fn is_primary_key(&self, property: &'a Property) -> bool {
        self.parser.is_primary_key(property)
    }

    pub fn is_foreign_key(&self, element: &'a dyn Annotated) -> bool {
        self.parser.is_foreign_key(element)
    }

    /// The foreign key of `element` together with the property it targets,
    /// when the target type is declared in this document.
    pub fn foreign_key_target(&self, element: &'a dyn Annotated) -> Option<(ForeignKey, &'a Property)> {
        let fk = self.parser.foreign_key(element)?;
        let target = self
            .parser
            .service()
            .type_by_name(&fk.type_name)?
            .property(&fk.property)?;
        Some((fk, target))
    }
}
