//! Observer pattern for engine call tracing.
//!
//! The engine hands every counted call to a single [`OperationObserver`].
//! [`OperationSubject`] fans one call out to any number of observers, so a
//! CLI can log and record at the same time.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::operation::OperationRecord;

/// Observer trait for receiving engine call records.
pub trait OperationObserver: Send + Sync {
    /// Receive the record of one counted call.
    fn on_operation(&self, record: &OperationRecord);
}

/// Subject that manages a collection of observers.
pub struct OperationSubject {
    observers: RwLock<Vec<Arc<dyn OperationObserver>>>,
}

impl OperationSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn OperationObserver>) {
        self.observers.write().push(observer);
    }
}

impl Default for OperationSubject {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationObserver for OperationSubject {
    fn on_operation(&self, record: &OperationRecord) {
        let observers = self.observers.read();
        for observer in observers.iter() {
            observer.on_operation(record);
        }
    }
}
