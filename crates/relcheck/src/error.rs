//! Error types for relcheck operations.
//!
//! Relationship problems are reported as diagnostics, not errors. The
//! [`RelcheckError`] type only covers failures at the edges: reading input,
//! decoding the schema document, writing the report, and rejecting a report
//! when warnings are denied.

use std::io;

use thiserror::Error;

use relcheck_parser::error::ValidationError;

/// The main error type for relcheck operations.
///
/// # Diagnostic Variants
///
/// The `Validation` variant carries every diagnostic of the rejected report
/// together with the text of the annotated document, so callers can render
/// source snippets.
#[derive(Debug, Error)]
pub enum RelcheckError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to decode schema document: {0}")]
    Load(#[from] serde_json::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{err}")]
    Validation { err: ValidationError, src: String },
}

impl RelcheckError {
    /// Create a new `Validation` error with the annotated document's text.
    pub fn new_validation_error(err: ValidationError, src: impl Into<String>) -> Self {
        Self::Validation {
            err,
            src: src.into(),
        }
    }
}
