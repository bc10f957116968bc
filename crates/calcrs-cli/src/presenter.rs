//! CLI result presenters.

use console::style;

use calcrs_core::OperationRecord;
use calcrs_orchestration::{CalculationResponse, ResultPresenter};

use crate::output::{format_json, format_record, format_response};

/// Plain-text presenter.
pub struct CLIResultPresenter {
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_response(&self, response: &CalculationResponse) {
        println!("{}", format_response(response, self.quiet));
    }

    fn present_trace(&self, records: &[OperationRecord]) {
        if self.quiet {
            return;
        }
        for record in records {
            println!("{}", format_record(record));
        }
    }

    fn present_error(&self, error: &str) {
        eprintln!("{} {error}", style("Error:").red().bold());
    }
}

/// JSON-lines presenter: one object per line on stdout.
pub struct JsonResultPresenter;

impl JsonResultPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonResultPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultPresenter for JsonResultPresenter {
    fn present_response(&self, response: &CalculationResponse) {
        match format_json(response) {
            Ok(line) => println!("{line}"),
            Err(e) => self.present_error(&e.to_string()),
        }
    }

    fn present_trace(&self, records: &[OperationRecord]) {
        let trace = serde_json::json!({ "trace": records });
        println!("{trace}");
    }

    fn present_error(&self, error: &str) {
        let body = serde_json::json!({ "error": error });
        eprintln!("{body}");
    }
}
