//! The outcome of checking one document.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use relcheck_parser::error::{CodeCounts, Diagnostic, ValidationError};

use crate::RelcheckError;

/// Diagnostics produced for one document, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    source_path: PathBuf,
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new(source_path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            source_path: source_path.into(),
            diagnostics,
        }
    }

    /// Absolute path of the checked document.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// `true` when no relationship problems were found.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }

    /// Number of diagnostics per error code.
    pub fn counts(&self) -> CodeCounts {
        CodeCounts::of(&self.diagnostics)
    }

    /// Serialize the diagnostics as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`RelcheckError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RelcheckError> {
        serde_json::to_string_pretty(&self.diagnostics).map_err(RelcheckError::Serialize)
    }

    /// Read the checked document, which diagnostic ranges point into.
    ///
    /// Returns `None` when the document cannot be read, for example when the
    /// schema was produced on another machine.
    pub fn read_source(&self) -> Option<String> {
        fs::read_to_string(&self.source_path)
            .inspect_err(|err| {
                debug!(
                    path = self.source_path.display().to_string(),
                    err:% = err;
                    "Annotated document is not readable"
                );
            })
            .ok()
    }

    /// Turn a non-empty report into a [`RelcheckError::Validation`].
    pub(crate) fn into_error(self) -> Result<Self, RelcheckError> {
        if self.is_clean() {
            return Ok(self);
        }
        let src = self.read_source().unwrap_or_default();
        Err(RelcheckError::new_validation_error(
            ValidationError::new(self.source_path, self.diagnostics),
            src,
        ))
    }
}

#[cfg(test)]
mod tests {
    use relcheck_parser::error::ErrorCode;

    use super::*;

    fn diagnostic(message: &str) -> Diagnostic {
        Diagnostic::warning(ErrorCode::Reference, message).with_source_path("/tmp/a.json")
    }

    #[test]
    fn test_clean_report() {
        let report = Report::new("/tmp/a.json", Vec::new());
        assert!(report.is_clean());
        assert_eq!(report.len(), 0);
        assert_eq!(report.to_json().unwrap(), "[]");
        assert!(report.into_error().is_ok());
    }

    #[test]
    fn test_json_array() {
        let report = Report::new("/tmp/a.json", vec![diagnostic("first"), diagnostic("second")]);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["code"], "rel/reference");
        assert_eq!(entries[0]["message"], "first");
        assert_eq!(entries[0]["severity"], "warning");
        assert_eq!(entries[1]["message"], "second");
    }

    #[test]
    fn test_into_error_keeps_every_diagnostic() {
        let report = Report::new("/nonexistent/a.json", vec![diagnostic("first"), diagnostic("second")]);

        match report.into_error() {
            Err(RelcheckError::Validation { err, src }) => {
                assert_eq!(err.diagnostics().len(), 2);
                assert_eq!(err.source_path(), Path::new("/nonexistent/a.json"));
                assert!(err.diagnostics()[0].severity().is_error());
                assert!(src.is_empty());
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }
}
