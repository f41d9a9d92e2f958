//! Configuration types for relcheck.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file:
//!
//! ```toml
//! [report]
//! deny_warnings = false
//! format = "human"
//! ```
//!
//! # Example
//!
//! ```
//! # use relcheck::config::{AppConfig, ReportFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.report().format(), ReportFormat::Human);
//! assert!(!config.report().deny_warnings());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report configuration section.
    #[serde(default)]
    report: ReportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given report settings.
    pub fn new(report: ReportConfig) -> Self {
        Self { report }
    }

    /// Returns the report configuration.
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Replace the report configuration.
    pub fn with_report(mut self, report: ReportConfig) -> Self {
        self.report = report;
        self
    }
}

/// How findings are reported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Treat any diagnostic as a failure.
    #[serde(default)]
    deny_warnings: bool,

    /// Output format of the report.
    #[serde(default)]
    format: ReportFormat,
}

impl ReportConfig {
    pub fn new(format: ReportFormat, deny_warnings: bool) -> Self {
        Self {
            deny_warnings,
            format,
        }
    }

    pub fn deny_warnings(&self) -> bool {
        self.deny_warnings
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn with_deny_warnings(mut self, deny_warnings: bool) -> Self {
        self.deny_warnings = deny_warnings;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }
}

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Rendered diagnostics with source snippets.
    #[default]
    Human,
    /// A JSON array of diagnostics.
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unknown report format '{other}', expected 'human' or 'json'"
            )),
        }
    }
}
