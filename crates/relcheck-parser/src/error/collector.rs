//! Collector for accumulating diagnostics.
//!
//! Validation never stops at the first problem; every check reports into a
//! [`DiagnosticCollector`] and the caller decides what to do with the full
//! list.

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics in emission order.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Emit several diagnostics, keeping their order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Finish collection and hand back everything emitted.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_is_empty() {
        let collector = DiagnosticCollector::new();

        assert!(collector.is_empty());
        assert!(collector.into_diagnostics().is_empty());
    }

    #[test]
    fn test_collector_keeps_emission_order() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning(ErrorCode::Shape, "first"));
        collector.extend([
            Diagnostic::warning(ErrorCode::Reference, "second"),
            Diagnostic::warning(ErrorCode::Shape, "third"),
        ]);

        assert_eq!(collector.len(), 3);
        let messages: Vec<_> = collector
            .into_diagnostics()
            .iter()
            .map(|d| d.message().to_string())
            .collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }

    #[test]
    fn test_collector_keeps_duplicates() {
        let mut collector = DiagnosticCollector::new();
        let diag = Diagnostic::warning(ErrorCode::Shape, "same");

        collector.emit(diag.clone());
        collector.emit(diag);

        assert_eq!(collector.len(), 2);
    }
}
