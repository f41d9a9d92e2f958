//! Diagnostic system for relationship validation.
//!
//! This module provides:
//! - Error codes that downstream tooling matches on verbatim
//! - Severity levels
//! - The [`Diagnostic`] type carrying message, source range and source path
//! - A collector for accumulating diagnostics without stopping at the first
//! - Per-code tallies for summaries
//! - [`ValidationError`] for callers that treat a non-empty report as failure
//!
//! # Example
//!
//! ```
//! # use relcheck_parser::error::{Diagnostic, ErrorCode};
//! # use relcheck_core::range::Range;
//!
//! let diag = Diagnostic::warning(ErrorCode::Reference, "Property \"id\" does not exist on type \"widget\".")
//!     .with_range(Range::decode(Some("4;9;60;4;52;103")))
//!     .with_source_path("/srv/specs/widgets.json")
//!     .with_help("declare the property or point the foreign key elsewhere");
//!
//! assert_eq!(diag.code().as_str(), "rel/reference");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod severity;
mod validation_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::{CodeCounts, ErrorCode};
pub use severity::Severity;
pub use validation_error::ValidationError;
