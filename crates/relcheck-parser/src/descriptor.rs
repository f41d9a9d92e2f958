//! Typed relationship descriptors and parse results.

use std::fmt;

use crate::error::Diagnostic;

/// A validated relationship declared by a `rel` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    /// The element is a primary key of its type.
    PrimaryKey,
    /// The element references a primary key property.
    ForeignKey(ForeignKey),
    /// The type links two of its own foreign-key properties.
    Edge(Edge),
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relationship::PrimaryKey => write!(f, "primary key"),
            Relationship::ForeignKey(fk) => write!(f, "{fk}"),
            Relationship::Edge(edge) => write!(f, "{edge}"),
        }
    }
}

/// A reference to a primary key property on some type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub type_name: String,
    pub property: String,
    /// Whether the referencing element holds many keys.
    pub many: bool,
}

impl ForeignKey {
    pub fn new(type_name: impl Into<String>, property: impl Into<String>, many: bool) -> Self {
        Self {
            type_name: type_name.into(),
            property: property.into(),
            many,
        }
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "foreign key -> {}.{}", self.type_name, self.property)?;
        if self.many {
            write!(f, " (many)")?;
        }
        Ok(())
    }
}

/// A directed edge between two foreign-key properties of the same type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub endpoints: (String, String),
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            endpoints: (from.into(), to.into()),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge {} -> {}", self.endpoints.0, self.endpoints.1)
    }
}

/// Outcome of parsing one `rel` annotation.
///
/// Either a relationship and no diagnostics, or diagnostics and no
/// relationship. A relationship is never partially valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    relationship: Option<Relationship>,
    diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub(crate) fn valid(relationship: Relationship) -> Self {
        Self {
            relationship: Some(relationship),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn invalid(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            relationship: None,
            diagnostics,
        }
    }

    pub fn relationship(&self) -> Option<&Relationship> {
        self.relationship.as_ref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_valid(&self) -> bool {
        self.relationship.is_some()
    }

    pub fn into_relationship(self) -> Option<Relationship> {
        self.relationship
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
