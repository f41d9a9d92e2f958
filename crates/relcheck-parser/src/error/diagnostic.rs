//! The core diagnostic type.
//!
//! A [`Diagnostic`] describes one validation failure: what went wrong, which
//! annotation it concerns and which document the annotation lives in.

use std::{fmt, path::PathBuf};

use serde::Serialize;

use relcheck_core::range::Range;

use crate::error::{ErrorCode, Severity};

/// A structured validation message with source location information.
///
/// The range always points at the offending annotation itself, never at the
/// element it references, so authors land on the declaration they have to
/// edit.
///
/// # Example
///
/// ```text
/// warning[rel/reference]: Property "sellerId" does not explicitly define a foreign key.
///   --> /srv/specs/orders.json:14:9
///    |
/// 14 |         "rel": { "edge": ["buyerId", "sellerId"] }
///    |                ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    range: Range,
    severity: Severity,
    source_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Create a diagnostic with an explicit severity.
    pub fn new(severity: Severity, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            range: Range::default(),
            severity,
            source_path: PathBuf::new(),
            help: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Range of the annotation this diagnostic was raised for.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Absolute path of the document the annotation was declared in.
    pub fn source_path(&self) -> &PathBuf {
        &self.source_path
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The same finding reported as [`Severity::Error`].
    pub fn escalated(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[rel/type]: message"
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}
