//! Concrete observer implementations.

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::observer::OperationObserver;
use crate::operation::OperationRecord;

/// Observer that logs every call through `tracing`.
///
/// Successful calls go out at `debug`, failed ones at `warn`.
pub struct LoggingObserver;

impl LoggingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationObserver for LoggingObserver {
    fn on_operation(&self, record: &OperationRecord) {
        if record.is_error() {
            warn!(
                sequence = record.sequence,
                operation = record.operation.name(),
                operands = %record.operands,
                outcome = %record.outcome,
                "engine call failed"
            );
        } else {
            debug!(
                sequence = record.sequence,
                operation = record.operation.name(),
                operands = %record.operands,
                outcome = %record.outcome,
                "engine call"
            );
        }
    }
}

/// Observer that keeps every record it sees, in arrival order.
pub struct HistoryObserver {
    records: Mutex<Vec<OperationRecord>>,
}

impl HistoryObserver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn records(&self) -> Vec<OperationRecord> {
        self.records.lock().clone()
    }

    /// Drain the history, leaving it empty.
    pub fn take(&self) -> Vec<OperationRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Default for HistoryObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationObserver for HistoryObserver {
    fn on_operation(&self, record: &OperationRecord) {
        self.records.lock().push(record.clone());
    }
}
