//! relcheck CLI library
//!
//! This module contains the core CLI logic for the relcheck tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;
use miette::{GraphicalReportHandler, GraphicalTheme};

use relcheck::{Checker, RelcheckError, Report, config::ReportFormat};

use error_adapter::{diagnostic_reportables, render};

/// Run the relcheck CLI application
///
/// Checks the input document and writes the report to the output file, or
/// to standard output when none is given.
///
/// # Errors
///
/// Returns `RelcheckError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Undecodable input documents
/// - Non-empty reports when warnings are denied
pub fn run(args: &Args) -> Result<Report, RelcheckError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Checking document"
    );

    let app_config = config::load_config(args)?;
    let format = app_config.report().format();

    let source = fs::read_to_string(&args.input)?;

    let checker = Checker::new(app_config);
    let report = checker.validate(&source, &args.input)?;

    let rendered = match format {
        ReportFormat::Json => report.to_json()? + "\n",
        ReportFormat::Human => render_human(&report, args.output.is_some()),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file = path; "Report written");
        }
        None => print!("{rendered}"),
    }

    Ok(report)
}

fn render_human(report: &Report, plain: bool) -> String {
    let handler = if plain {
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
    } else {
        GraphicalReportHandler::new()
    };

    let document = report.read_source().unwrap_or_default();
    let mut out = render(&handler, &diagnostic_reportables(report.diagnostics(), &document));
    out.push_str(&summary(report));
    out
}

/// One-line verdict, e.g. "orders.yaml: 2 warnings (1 rel/type, 1 rel/reference)".
fn summary(report: &Report) -> String {
    let path = report.source_path().display();
    match report.len() {
        0 => format!("{path}: no relationship problems found\n"),
        1 => format!("{path}: 1 warning ({})\n", report.counts()),
        n => format!("{path}: {n} warnings ({})\n", report.counts()),
    }
}

#[cfg(test)]
mod tests {
    use relcheck_parser::error::{Diagnostic, ErrorCode};

    use super::*;

    #[test]
    fn test_summary_counts_codes() {
        let report = Report::new(
            "/specs/orders.yaml",
            vec![
                Diagnostic::warning(ErrorCode::Reference, "a"),
                Diagnostic::warning(ErrorCode::Shape, "b"),
                Diagnostic::warning(ErrorCode::Reference, "c"),
            ],
        );

        assert_eq!(
            summary(&report),
            "/specs/orders.yaml: 3 warnings (1 rel/type, 2 rel/reference)\n"
        );
        assert_eq!(
            summary(&Report::new("/specs/orders.yaml", Vec::new())),
            "/specs/orders.yaml: no relationship problems found\n"
        );
    }
}
