//! Request execution: single requests and batches over one shared engine.

use std::time::{Duration, Instant};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info};

use calcrs_core::{CalculatorEngine, ComplexCalculationPolicy, Operation};

use crate::interfaces::CalculationResponse;
use crate::request::{Request, RequestError};

/// Execute one request against `engine`.
///
/// # Errors
///
/// [`RequestError::Validation`] when the request fails boundary checks
/// (the engine is not called), or [`RequestError::Calculation`] when the
/// engine rejects the call (the call is still counted).
#[allow(clippy::cast_precision_loss)]
pub fn execute(
    engine: &CalculatorEngine,
    request: &Request,
) -> Result<CalculationResponse, RequestError> {
    request.validate()?;

    let response = match *request {
        Request::Add { a, b } => CalculationResponse::new(
            engine.add(a.into(), b.into()) as f64,
            Operation::Add.label(),
        ),
        Request::Subtract { a, b } => CalculationResponse::new(
            engine.subtract(a.into(), b.into()) as f64,
            Operation::Subtract.label(),
        ),
        Request::Multiply { a, b } => CalculationResponse::new(
            engine.multiply(a.into(), b.into()) as f64,
            Operation::Multiply.label(),
        ),
        Request::Divide { a, b } => CalculationResponse::new(
            engine.divide(a.into(), b.into())?,
            Operation::Divide.label(),
        ),
        Request::Factorial { n } => CalculationResponse::new(
            engine.factorial(n.into())? as f64,
            Operation::Factorial.label(),
        ),
        Request::Prime { n } => {
            let prime = engine.is_prime(n.into());
            let verdict = if prime { "" } else { "not " };
            CalculationResponse::new(
                if prime { 1.0 } else { 0.0 },
                format!("prime check: {n} is {verdict}prime"),
            )
        }
        Request::Complex { a, b } => {
            let result = ComplexCalculationPolicy::new(engine).evaluate(a, b)?;
            debug!(a, b, branch = ?result.branch, "complex calculation");
            CalculationResponse::new(result.value, result.label)
        }
        Request::Count => {
            CalculationResponse::new(engine.operation_count() as f64, "operations count")
        }
        Request::Reset => {
            engine.reset();
            CalculationResponse::new(0.0, "reset")
        }
    };

    Ok(response)
}

/// How a batch is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// In script order, on the calling thread.
    #[default]
    Sequential,
    /// Across the rayon pool; responses keep script order.
    Parallel,
}

/// Options for [`execute_batch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub mode: BatchMode,
    /// Stop at the first failing request (sequential mode only).
    pub fail_fast: bool,
}

/// Result of a single request inside a batch.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub request: Request,
    pub outcome: Result<CalculationResponse, RequestError>,
    pub duration: Duration,
}

impl BatchEntry {
    /// The response to show for this entry, failures included.
    #[must_use]
    pub fn response(&self) -> CalculationResponse {
        match &self.outcome {
            Ok(response) => response.clone(),
            Err(e) => CalculationResponse::error(e),
        }
    }
}

/// Everything a batch produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One entry per executed request, in script order.
    pub entries: Vec<BatchEntry>,
    /// Engine counter after the batch.
    pub operation_count: u64,
    /// Wall time for the whole batch.
    pub duration: Duration,
}

impl BatchReport {
    /// Number of entries whose request failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_err()).count()
    }

    /// Whether every request ran to completion.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

/// Execute a batch of requests against one shared engine.
///
/// In [`BatchMode::Parallel`] every request runs on the rayon pool against
/// the same engine; the counter still ends at the sum of all increments.
///
/// # Errors
///
/// [`RequestError::OrderDependent`] when a parallel batch contains `count`
/// or `reset`, whose results would depend on scheduling. Nothing runs in
/// that case. Per-request failures are reported inside the [`BatchReport`].
pub fn execute_batch(
    engine: &CalculatorEngine,
    requests: &[Request],
    opts: BatchOptions,
) -> Result<BatchReport, RequestError> {
    let start_time = Instant::now();

    let entries = match opts.mode {
        BatchMode::Sequential => {
            let mut entries = Vec::with_capacity(requests.len());
            for request in requests {
                let entry = run_entry(engine, request);
                let failed = entry.outcome.is_err();
                entries.push(entry);
                if failed && opts.fail_fast {
                    break;
                }
            }
            entries
        }
        BatchMode::Parallel => {
            if let Some(request) = requests.iter().find(|r| r.is_order_dependent()) {
                return Err(RequestError::OrderDependent(request.name()));
            }
            requests
                .par_iter()
                .map(|request| run_entry(engine, request))
                .collect()
        }
    };

    let report = BatchReport {
        entries,
        operation_count: engine.operation_count(),
        duration: start_time.elapsed(),
    };
    info!(
        requests = report.entries.len(),
        failures = report.failures(),
        operation_count = report.operation_count,
        mode = ?opts.mode,
        "batch complete"
    );
    Ok(report)
}

fn run_entry(engine: &CalculatorEngine, request: &Request) -> BatchEntry {
    let start = Instant::now();
    let outcome = execute(engine, request);
    BatchEntry {
        request: *request,
        outcome,
        duration: start.elapsed(),
    }
}
