//! Severity levels for diagnostics.

use std::fmt;

use serde::{Serialize, Serializer};

/// The severity level of a diagnostic.
///
/// Relationship validation reports [`Severity::Warning`]: a malformed
/// annotation degrades to "no relationship" instead of aborting the
/// document. Findings become [`Severity::Error`] once a
/// [`ValidationError`](crate::error::ValidationError) rejects the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal issue that must be fixed.
    Error,

    /// A non-fatal issue that should be addressed.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
