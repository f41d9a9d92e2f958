//! The schema object model.
//!
//! A [`Service`] is the already-parsed intermediate representation of a
//! service description: interfaces with methods and parameters, and type
//! definitions with properties. Parameters, types and properties may carry
//! metadata entries, which is where relationship annotations live.
//!
//! The model is read-only once built. Elements are created either by
//! deserializing the camelCase IR JSON or through the `with_*` builders.
//!
//! # Example
//!
//! ```
//! # use relcheck_core::schema::{Annotated, MetaEntry, Property, Service, Type};
//! # use relcheck_core::value::MetaValue;
//! let service = Service::new("api.json").with_type(
//!     Type::new("widget").with_property(
//!         Property::new("id").with_meta(MetaEntry::new(
//!             "rel",
//!             MetaValue::object([("primaryKey", MetaValue::Bool(true))]),
//!         )),
//!     ),
//! );
//!
//! let widget = service.type_by_name("widget").expect("type exists");
//! assert!(widget.property("id").and_then(|p| p.annotation("rel")).is_some());
//! ```

use std::fmt;

use serde::Deserialize;

use crate::value::{Literal, MetaValue};

/// The kind of schema element an annotation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Parameter,
    Type,
    Property,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Parameter => write!(f, "parameter"),
            ElementKind::Type => write!(f, "type"),
            ElementKind::Property => write!(f, "property"),
        }
    }
}

/// A schema element that may carry metadata.
pub trait Annotated {
    /// What kind of element this is.
    fn kind(&self) -> ElementKind;

    /// The declared name of the element.
    fn name(&self) -> &str;

    /// All metadata entries in declaration order.
    fn meta(&self) -> &[MetaEntry];

    /// The element viewed as a type definition, if it is one.
    fn as_type(&self) -> Option<&Type> {
        None
    }

    /// The first metadata entry with the given key.
    fn annotation(&self, key: &str) -> Option<&MetaEntry> {
        self.meta().iter().find(|entry| entry.key.value == key)
    }
}

/// A key/value metadata entry attached to a schema element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetaEntry {
    pub key: Literal<String>,
    pub value: Literal<MetaValue>,
}

impl MetaEntry {
    pub fn new(key: impl Into<String>, value: MetaValue) -> Self {
        Self {
            key: Literal::new(key.into()),
            value: Literal::new(value),
        }
    }

    /// Attach an encoded location to the entry's value.
    pub fn with_loc(mut self, loc: impl Into<String>) -> Self {
        self.value.loc = Some(loc.into());
        self
    }
}

/// A complete service description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    source_path: String,
    #[serde(default)]
    interfaces: Vec<Interface>,
    #[serde(default)]
    types: Vec<Type>,
}

impl Service {
    /// Create an empty service declared in `source_path`.
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            interfaces: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Replace the declared source path.
    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = source_path.into();
        self
    }

    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.types.push(ty);
        self
    }

    /// Path of the source document, as declared by the IR (may be relative
    /// or empty).
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Find a type definition by name.
    pub fn type_by_name(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|ty| ty.name() == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Interface {
    name: String,
    #[serde(default)]
    methods: Vec<Method>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Method {
    name: Literal<String>,
    #[serde(default)]
    parameters: Vec<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Literal::new(name.into()),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name.value
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

/// A method parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    name: Literal<String>,
    #[serde(default)]
    meta: Vec<MetaEntry>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Literal::new(name.into()),
            meta: Vec::new(),
        }
    }

    pub fn with_meta(mut self, entry: MetaEntry) -> Self {
        self.meta.push(entry);
        self
    }
}

impl Annotated for Parameter {
    fn kind(&self) -> ElementKind {
        ElementKind::Parameter
    }

    fn name(&self) -> &str {
        &self.name.value
    }

    fn meta(&self) -> &[MetaEntry] {
        &self.meta
    }
}

/// A type definition with its properties.
#[derive(Debug, Clone, Deserialize)]
pub struct Type {
    name: Literal<String>,
    #[serde(default)]
    properties: Vec<Property>,
    #[serde(default)]
    meta: Vec<MetaEntry>,
}

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Literal::new(name.into()),
            properties: Vec::new(),
            meta: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_meta(mut self, entry: MetaEntry) -> Self {
        self.meta.push(entry);
        self
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Find a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|prop| prop.name() == name)
    }
}

impl Annotated for Type {
    fn kind(&self) -> ElementKind {
        ElementKind::Type
    }

    fn name(&self) -> &str {
        &self.name.value
    }

    fn meta(&self) -> &[MetaEntry] {
        &self.meta
    }

    fn as_type(&self) -> Option<&Type> {
        Some(self)
    }
}

/// A property of a type definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    name: Literal<String>,
    #[serde(default)]
    meta: Vec<MetaEntry>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Literal::new(name.into()),
            meta: Vec::new(),
        }
    }

    pub fn with_meta(mut self, entry: MetaEntry) -> Self {
        self.meta.push(entry);
        self
    }
}

impl Annotated for Property {
    fn kind(&self) -> ElementKind {
        ElementKind::Property
    }

    fn name(&self) -> &str {
        &self.name.value
    }

    fn meta(&self) -> &[MetaEntry] {
        &self.meta
    }
}
