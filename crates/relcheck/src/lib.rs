//! relcheck - validation of relationship annotations in service schemas.
//!
//! Schema documents mark parameters, types and properties as primary keys,
//! foreign keys or edges through a `rel` metadata entry. This crate loads the
//! schema's JSON intermediate representation and reports every annotation that
//! is malformed or does not resolve against the document.

pub mod config;

mod error;
mod report;

pub use relcheck_core::{range, schema, value};
pub use relcheck_parser::{Edge, ForeignKey, ParseResult, RelParser, RelQuery, Relationship};

pub use error::RelcheckError;
pub use report::Report;

use log::{debug, info, trace};

use relcheck_core::schema::Service;

use config::AppConfig;

/// Entry point for checking schema documents.
///
/// # Examples
///
/// ```rust
/// use relcheck::{Checker, config::AppConfig};
///
/// let source = r#"{
///     "sourcePath": "widgets.json",
///     "types": [{
///         "name": { "value": "widget" },
///         "properties": [{
///             "name": { "value": "id" },
///             "meta": [{ "key": { "value": "rel" }, "value": { "value": { "primaryKey": true } } }]
///         }]
///     }]
/// }"#;
///
/// let checker = Checker::new(AppConfig::default());
/// let report = checker.validate(source, "widgets.ir.json").expect("valid document");
/// assert!(report.is_clean());
/// ```
#[derive(Debug, Default)]
pub struct Checker {
    config: AppConfig,
}

impl Checker {
    /// Create a new checker with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode a schema document from its JSON intermediate representation.
    ///
    /// When the document does not declare a `sourcePath`, `path` is used.
    ///
    /// # Errors
    ///
    /// Returns [`RelcheckError::Load`] if `source` is not a valid document.
    pub fn load(&self, source: &str, path: &str) -> Result<Service, RelcheckError> {
        info!(path; "Loading schema document");

        let service: Service = serde_json::from_str(source)?;
        let service = if service.source_path().is_empty() {
            debug!(path; "Document declares no source path, using input path");
            service.with_source_path(path)
        } else {
            service
        };

        debug!(
            interfaces = service.interfaces().len(),
            types = service.types().len();
            "Schema document loaded"
        );
        Ok(service)
    }

    /// Check every relationship annotation of `service`.
    pub fn check(&self, service: &Service) -> Report {
        info!(source_path = service.source_path(); "Checking relationships");

        let parser = RelParser::new(service);
        let diagnostics = relcheck_parser::rule::collect(&parser);

        trace!(stats:? = parser.stats(); "Parser statistics");
        info!(diagnostics = diagnostics.len(); "Relationship check finished");

        Report::new(parser.source_path(), diagnostics)
    }

    /// Load and check a document in one step.
    ///
    /// # Errors
    ///
    /// Returns [`RelcheckError::Load`] for undecodable input, and
    /// [`RelcheckError::Validation`] when the report is not clean and the
    /// configuration denies warnings.
    pub fn validate(&self, source: &str, path: &str) -> Result<Report, RelcheckError> {
        let service = self.load(source, path)?;
        let report = self.check(&service);

        if self.config.report().deny_warnings() {
            report.into_error()
        } else {
            Ok(report)
        }
    }
}
