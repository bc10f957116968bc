//! Orchestration interfaces.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use calcrs_core::OperationRecord;

/// Value plus descriptive label returned for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Numeric result; 0 for failures.
    pub result: f64,
    /// Label such as `addition` or `error: division by zero`.
    pub operation: String,
    /// Milliseconds since the Unix epoch when the response was built.
    pub timestamp: u64,
}

impl CalculationResponse {
    #[must_use]
    pub fn new(result: f64, operation: impl Into<String>) -> Self {
        Self {
            result,
            operation: operation.into(),
            timestamp: now_millis(),
        }
    }

    /// Failure response: value 0, label `error: <message>`.
    #[must_use]
    pub fn error(err: &impl fmt::Display) -> Self {
        Self::new(0.0, format!("error: {err}"))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.operation.starts_with("error: ")
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present one response.
    fn present_response(&self, response: &CalculationResponse);

    /// Present the engine calls made while serving a request.
    fn present_trace(&self, records: &[OperationRecord]);

    /// Present an error that has no response attached.
    fn present_error(&self, error: &str);
}
