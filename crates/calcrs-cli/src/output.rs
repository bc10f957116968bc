//! CLI output formatting.

use std::time::Duration;

use calcrs_core::OperationRecord;
use calcrs_orchestration::CalculationResponse;

/// Format a response value.
///
/// Integral values print without a fractional part, others with the
/// shortest representation that round-trips. Negative zero prints as `0`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Format a response as one line of text.
#[must_use]
pub fn format_response(response: &CalculationResponse, quiet: bool) -> String {
    if quiet {
        format_value(response.result)
    } else {
        format!("{}: {}", response.operation, format_value(response.result))
    }
}

/// Format one engine call for a trace listing.
#[must_use]
pub fn format_record(record: &OperationRecord) -> String {
    format!("  {record}")
}

/// Format a response as a single JSON line.
///
/// # Errors
///
/// Returns the serializer error; `CalculationResponse` only holds plain
/// fields so this does not fail in practice.
pub fn format_json(response: &CalculationResponse) -> serde_json::Result<String> {
    serde_json::to_string(response)
}

/// Format a duration for display.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else {
        format!("{secs:.3}s")
    }
}
