//! Error codes for relationship diagnostics.
//!
//! The string form of each code is part of the output contract: reports and
//! editor integrations match on `rel/type` and `rel/reference` literally.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::Diagnostic;

/// Error codes for categorizing relationship diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed annotation.
    ///
    /// The `rel` metadata is present but structurally invalid: wrong value
    /// types, unexpected keys, or not exactly one relationship kind.
    Shape,

    /// Unresolved or mistyped reference.
    ///
    /// The annotation is well-formed but names a property that does not
    /// exist, or one that does not have the required relationship kind.
    Reference,
}

impl ErrorCode {
    /// Every code, in report order.
    pub const ALL: [ErrorCode; 2] = [ErrorCode::Shape, ErrorCode::Reference];

    /// Returns the code as it appears in reports (e.g., "rel/type").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Shape => "rel/type",
            ErrorCode::Reference => "rel/reference",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::Shape => "malformed relationship annotation",
            ErrorCode::Reference => "invalid relationship reference",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Number of diagnostics per [`ErrorCode`].
///
/// Displays as `"1 rel/type, 3 rel/reference"`, leaving out codes that did
/// not occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeCounts {
    shape: usize,
    reference: usize,
}

impl CodeCounts {
    pub fn of(diagnostics: &[Diagnostic]) -> Self {
        let mut counts = Self::default();
        for diagnostic in diagnostics {
            match diagnostic.code() {
                ErrorCode::Shape => counts.shape += 1,
                ErrorCode::Reference => counts.reference += 1,
            }
        }
        counts
    }

    pub fn get(&self, code: ErrorCode) -> usize {
        match code {
            ErrorCode::Shape => self.shape,
            ErrorCode::Reference => self.reference,
        }
    }

    pub fn total(&self) -> usize {
        self.shape + self.reference
    }
}

impl fmt::Display for CodeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for code in ErrorCode::ALL {
            let count = self.get(code);
            if count == 0 {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{count} {code}")?;
            first = false;
        }
        Ok(())
    }
}
