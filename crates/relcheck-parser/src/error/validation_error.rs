//! Rejection of a document whose report is not clean.
//!
//! When warnings are denied, every diagnostic of the document is escalated
//! to an error and carried in one [`ValidationError`] together with the
//! document's path, so the caller can both render each finding and print a
//! one-line verdict.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::{CodeCounts, Diagnostic};

/// A document rejected because of its relationship diagnostics.
#[derive(Debug)]
pub struct ValidationError {
    source_path: PathBuf,
    diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    /// Reject the document at `source_path`.
    ///
    /// Each diagnostic is escalated to [`Severity::Error`](crate::error::Severity::Error).
    pub fn new(source_path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            source_path: source_path.into(),
            diagnostics: diagnostics.into_iter().map(Diagnostic::escalated).collect(),
        }
    }

    /// Path of the rejected document.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn counts(&self) -> CodeCounts {
        CodeCounts::of(&self.diagnostics)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "orders.json: 2 relationship problems (1 rel/type, 1 rel/reference)"
        let noun = if self.diagnostics.len() == 1 {
            "problem"
        } else {
            "problems"
        };
        write!(
            f,
            "{}: {} relationship {noun}",
            self.source_path.display(),
            self.diagnostics.len()
        )?;
        if !self.diagnostics.is_empty() {
            write!(f, " ({})", self.counts())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn rejected() -> ValidationError {
        ValidationError::new(
            "/srv/specs/orders.json",
            vec![
                Diagnostic::warning(ErrorCode::Reference, "first"),
                Diagnostic::warning(ErrorCode::Shape, "second"),
                Diagnostic::warning(ErrorCode::Reference, "third"),
            ],
        )
    }

    #[test]
    fn test_validation_error_escalates_diagnostics() {
        let err = rejected();

        assert_eq!(err.diagnostics().len(), 3);
        assert!(err.diagnostics().iter().all(|d| d.severity().is_error()));
        assert_eq!(err.diagnostics()[1].message(), "second");
    }

    #[test]
    fn test_validation_error_counts_codes() {
        let err = rejected();

        assert_eq!(err.source_path(), Path::new("/srv/specs/orders.json"));
        assert_eq!(err.counts().get(ErrorCode::Reference), 2);
        assert_eq!(err.counts().get(ErrorCode::Shape), 1);
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            rejected().to_string(),
            "/srv/specs/orders.json: 3 relationship problems (1 rel/type, 2 rel/reference)"
        );

        let single = ValidationError::new(
            "a.json",
            vec![Diagnostic::warning(ErrorCode::Reference, "missing")],
        );
        assert_eq!(
            single.to_string(),
            "a.json: 1 relationship problem (1 rel/reference)"
        );
    }
}
