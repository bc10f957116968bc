//! # calcrs-core
//!
//! Core library for the calcrs arithmetic service: a counting
//! [`CalculatorEngine`] and the sign-based [`ComplexCalculationPolicy`]
//! that composes engine calls into a single result.

pub mod constants;
pub mod engine;
pub mod observer;
pub mod observers;
pub mod operation;
pub mod policy;

// Re-exports
pub use constants::{exit_codes, COMPLEX_CALCULATION_LABEL, FACTORIAL_TABLE, MAX_FACTORIAL_I64};
pub use engine::{CalcError, CalculatorEngine};
pub use observer::{OperationObserver, OperationSubject};
pub use operation::{Operation, OperationRecord};
pub use policy::{Branch, ComplexCalculationPolicy, ComplexResult};

/// Run the complex calculation once on a throwaway engine.
///
/// Convenience for callers that do not care about the operation counter.
///
/// # Example
/// ```
/// let r = calcrs_core::complex_calculation(5, 3);
/// assert_eq!(r.value, 23.0);
/// assert_eq!(r.label, "complex calculation");
/// ```
#[must_use]
pub fn complex_calculation(a: i32, b: i32) -> ComplexResult {
    let engine = CalculatorEngine::new();
    ComplexCalculationPolicy::new(&engine)
        .evaluate(a, b)
        .expect("complex calculation cannot fail for i32 inputs")
}
