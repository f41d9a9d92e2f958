//! Whole-document diagnostic collection.

use log::debug;

use relcheck_core::schema::{Annotated, Service};

use crate::{
    error::{Diagnostic, DiagnosticCollector},
    rel::RelParser,
};

/// Validate every annotated element of the session's document.
///
/// Elements are visited in a fixed order: parameters of every method of
/// every interface, then each type followed by its properties, all in
/// declaration order. Diagnostics are concatenated in that order without
/// deduplication, so one pass reports every problem the document has.
pub fn collect<'a>(parser: &RelParser<'a>) -> Vec<Diagnostic> {
    let service = parser.service();
    let mut collector = DiagnosticCollector::new();
    let mut visited = 0usize;

    let mut check = |element: &'a dyn Annotated| {
        visited += 1;
        if let Some(result) = parser.parse(element) {
            collector.extend(result.into_diagnostics());
        }
    };

    for interface in service.interfaces() {
        for method in interface.methods() {
            for parameter in method.parameters() {
                check(parameter);
            }
        }
    }

    for ty in service.types() {
        check(ty);
        for property in ty.properties() {
            check(property);
        }
    }

    debug!(
        source_path = service.source_path(),
        elements = visited,
        diagnostics = collector.len();
        "Relationship rule finished"
    );

    collector.into_diagnostics()
}

/// Validate `service` in a fresh session.
pub fn check(service: &Service) -> Vec<Diagnostic> {
    collect(&RelParser::new(service))
}
