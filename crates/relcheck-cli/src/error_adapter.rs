//! Adapters for rendering relcheck diagnostics and errors with miette.
//!
//! This module bridges the library's plain diagnostic and error types to
//! miette's rich report formatting used by the CLI.
//!
//! # Multi-Diagnostic Support
//!
//! A report or a [`RelcheckError::Validation`] may hold many diagnostics.
//! Each one is rendered independently.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity as MietteSeverity,
    SourceSpan,
};

use relcheck::{RelcheckError, range::Range};
use relcheck_parser::error::{Diagnostic, Severity};

/// Adapter for a single relationship diagnostic.
///
/// `src` is the text of the annotated document. When it is empty or does not
/// cover the diagnostic's range, the report is rendered without a snippet.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }

    fn span(&self) -> Option<SourceSpan> {
        let range = self.diag.range();
        covers(self.src, range).then(|| range_to_miette(range))
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.code()))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if let Some(help) = self.diag.help() {
            return Some(Box::new(help) as Box<dyn fmt::Display>);
        }
        let start = self.diag.range().start();
        Some(Box::new(format!(
            "at {}:{}:{}",
            self.diag.source_path().display(),
            start.line(),
            start.column()
        )))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.span()?;
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        let label = LabeledSpan::new_primary_with_span(
            Some(self.diag.code().description().to_string()),
            span,
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`RelcheckError`] variants without diagnostics.
pub struct ErrorAdapter<'a>(pub &'a RelcheckError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            RelcheckError::Io(_) => "relcheck::io",
            RelcheckError::Load(_) => "relcheck::load",
            RelcheckError::Serialize(_) => "relcheck::serialize",
            RelcheckError::Config(_) => "relcheck::config",
            RelcheckError::Validation { .. } => return None,
        };
        Some(Box::new(code))
    }
}

/// A reportable item that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A relationship diagnostic, possibly with a source snippet.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A plain error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Whether `range` lies inside `src`.
fn covers(src: &str, range: Range) -> bool {
    !src.is_empty() && range.end().offset() <= src.len()
}

/// Convert an annotation [`Range`] to a miette [`SourceSpan`].
fn range_to_miette(range: Range) -> SourceSpan {
    SourceSpan::new(range.start().offset().into(), range.len())
}

/// Wrap each of `diagnostics` for rendering against the document text `src`.
pub fn diagnostic_reportables<'a>(diagnostics: &'a [Diagnostic], src: &'a str) -> Vec<Reportable<'a>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
        .collect()
}

/// Convert a [`RelcheckError`] into a list of reportable items.
///
/// For [`RelcheckError::Validation`], this returns one [`Reportable`] for
/// each diagnostic. For other variants, this returns a single [`Reportable`].
pub fn to_reportables(err: &RelcheckError) -> Vec<Reportable<'_>> {
    match err {
        RelcheckError::Validation {
            err: validation,
            src,
        } => diagnostic_reportables(validation.diagnostics(), src),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render `reportables` one after another with `handler`.
pub fn render(handler: &GraphicalReportHandler, reportables: &[Reportable<'_>]) -> String {
    let mut out = String::new();
    for reportable in reportables {
        handler
            .render_report(&mut out, reportable)
            .expect("Writing to String buffer is infallible");
    }
    out
}
