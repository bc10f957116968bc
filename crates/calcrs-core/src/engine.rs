//! The counting arithmetic engine.
//!
//! `CalculatorEngine` owns the operation counter. Every public call to
//! `add`, `subtract`, `multiply`, `divide` or `factorial` advances it by
//! exactly one *before* any validation runs, so a caller that sees an
//! error also sees the counter already moved. `is_prime` and the counter
//! accessors leave it alone.
//!
//! The counter is an `AtomicU64`: one engine can be shared across threads
//! and concurrent calls never lose an increment.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::constants::{FACTORIAL_TABLE, MAX_FACTORIAL_I64};
use crate::observer::OperationObserver;
use crate::operation::{Operation, OperationRecord};

/// Error type for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// `divide` was called with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `factorial` was called with a negative argument.
    #[error("negative factorial input: {0}")]
    NegativeFactorialInput(i64),

    /// The factorial does not fit in an `i64`.
    #[error("factorial overflow: {0}! does not fit in 64 bits")]
    FactorialOverflow(i64),
}

/// Stateful arithmetic primitives plus a shared invocation counter.
pub struct CalculatorEngine {
    operation_count: AtomicU64,
    observer: Option<Arc<dyn OperationObserver>>,
}

impl CalculatorEngine {
    /// Create an engine with a zeroed counter and no observer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operation_count: AtomicU64::new(0),
            observer: None,
        }
    }

    /// Create an engine that reports every counted call to `observer`.
    #[must_use]
    pub fn with_observer(observer: Arc<dyn OperationObserver>) -> Self {
        Self {
            operation_count: AtomicU64::new(0),
            observer: Some(observer),
        }
    }

    /// `a + b`, wrapping on `i64` overflow.
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let sequence = self.count();
        let result = a.wrapping_add(b);
        self.notify(sequence, Operation::Add, || format!("{a}, {b}"), || {
            result.to_string()
        });
        result
    }

    /// `a - b`, wrapping on `i64` overflow.
    pub fn subtract(&self, a: i64, b: i64) -> i64 {
        let sequence = self.count();
        let result = a.wrapping_sub(b);
        self.notify(sequence, Operation::Subtract, || format!("{a}, {b}"), || {
            result.to_string()
        });
        result
    }

    /// `a * b`, wrapping on `i64` overflow.
    ///
    /// A zero operand short-circuits to 0 without computing the product.
    pub fn multiply(&self, a: i64, b: i64) -> i64 {
        let sequence = self.count();
        let result = if a == 0 || b == 0 {
            0
        } else {
            a.wrapping_mul(b)
        };
        self.notify(sequence, Operation::Multiply, || format!("{a}, {b}"), || {
            result.to_string()
        });
        result
    }

    /// Floating-point `a / b`.
    ///
    /// # Errors
    ///
    /// [`CalcError::DivisionByZero`] when `b == 0`. The call is counted
    /// either way.
    #[allow(clippy::float_cmp)]
    pub fn divide(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        let sequence = self.count();
        let result = if b == 0.0 {
            Err(CalcError::DivisionByZero)
        } else {
            Ok(a / b)
        };
        self.notify(sequence, Operation::Divide, || format!("{a}, {b}"), || {
            render_outcome(&result)
        });
        result
    }

    /// `n!` for `0 <= n <= 20`.
    ///
    /// One call counts once, however large `n` is.
    ///
    /// # Errors
    ///
    /// [`CalcError::NegativeFactorialInput`] for `n < 0` and
    /// [`CalcError::FactorialOverflow`] for `n > 20`. The call is counted
    /// either way.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn factorial(&self, n: i64) -> Result<i64, CalcError> {
        let sequence = self.count();
        let result = if n < 0 {
            Err(CalcError::NegativeFactorialInput(n))
        } else if n > MAX_FACTORIAL_I64 {
            Err(CalcError::FactorialOverflow(n))
        } else {
            Ok(FACTORIAL_TABLE[n as usize])
        };
        self.notify(sequence, Operation::Factorial, || n.to_string(), || {
            render_outcome(&result)
        });
        result
    }

    /// Primality by 6k±1 trial division. Not counted.
    #[must_use]
    pub fn is_prime(&self, n: i64) -> bool {
        if n <= 1 {
            return false;
        }
        if n <= 3 {
            return true;
        }
        if n % 2 == 0 || n % 3 == 0 {
            return false;
        }
        // `i <= n / i` is `i * i <= n` without the overflow near i64::MAX.
        let mut i = 5i64;
        while i <= n / i {
            if n % i == 0 || n % (i + 2) == 0 {
                return false;
            }
            i += 6;
        }
        true
    }

    /// Number of counted calls since creation or the last [`reset`](Self::reset).
    #[must_use]
    pub fn operation_count(&self) -> u64 {
        self.operation_count.load(Ordering::SeqCst)
    }

    /// Set the counter back to zero.
    pub fn reset(&self) {
        let previous = self.operation_count.swap(0, Ordering::SeqCst);
        debug!(previous, "operation counter reset");
    }

    /// Advance the counter, returning the value after this call.
    fn count(&self) -> u64 {
        self.operation_count.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn notify(
        &self,
        sequence: u64,
        operation: Operation,
        operands: impl FnOnce() -> String,
        outcome: impl FnOnce() -> String,
    ) {
        if let Some(observer) = &self.observer {
            observer.on_operation(&OperationRecord {
                sequence,
                operation,
                operands: operands(),
                outcome: outcome(),
            });
        }
    }
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CalculatorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorEngine")
            .field("operation_count", &self.operation_count())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

fn render_outcome<T: fmt::Display>(result: &Result<T, CalcError>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format!("error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observers::HistoryObserver;

    #[test]
    fn add_and_subtract() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.add(5, 3), 8);
        assert_eq!(engine.add(-5, -3), -8);
        assert_eq!(engine.add(5, -3), 2);
        assert_eq!(engine.subtract(10, 5), 5);
        assert_eq!(engine.subtract(0, 5), -5);
        assert_eq!(engine.subtract(-10, -5), -5);
    }

    #[test]
    fn add_wraps_instead_of_panicking() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.add(i64::MAX, 1), i64::MIN);
        assert_eq!(engine.subtract(i64::MIN, 1), i64::MAX);
    }

    #[test]
    fn multiply_by_zero_short_circuits() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.multiply(0, 5), 0);
        assert_eq!(engine.multiply(5, 0), 0);
        assert_eq!(engine.multiply(0, i64::MIN), 0);
        assert_eq!(engine.multiply(4, 5), 20);
        assert_eq!(engine.multiply(-4, 5), -20);
    }

    #[test]
    fn divide_values() {
        let engine = CalculatorEngine::new();
        assert!((engine.divide(10.0, 2.0).unwrap() - 5.0).abs() < 1e-9);
        assert!((engine.divide(10.0, 3.0).unwrap() - 3.333).abs() < 0.001);
    }

    #[test]
    fn divide_by_zero() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.divide(10.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(engine.divide(10.0, -0.0), Err(CalcError::DivisionByZero));
        assert_eq!(
            CalcError::DivisionByZero.to_string(),
            "division by zero"
        );
    }

    #[test]
    fn factorial_small_values() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.factorial(0), Ok(1));
        assert_eq!(engine.factorial(1), Ok(1));
        assert_eq!(engine.factorial(2), Ok(2));
        assert_eq!(engine.factorial(3), Ok(6));
        assert_eq!(engine.factorial(5), Ok(120));
        assert_eq!(engine.factorial(6), Ok(720));
    }

    #[test]
    fn factorial_past_32_bit_width_is_exact() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.factorial(12), Ok(479_001_600));
        assert_eq!(engine.factorial(13), Ok(6_227_020_800));
    }

    #[test]
    fn factorial_64_bit_boundary() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.factorial(20), Ok(2_432_902_008_176_640_000));
        assert_eq!(engine.factorial(21), Err(CalcError::FactorialOverflow(21)));
        assert_eq!(engine.operation_count(), 2);
    }

    #[test]
    fn factorial_negative() {
        let engine = CalculatorEngine::new();
        assert_eq!(
            engine.factorial(-1),
            Err(CalcError::NegativeFactorialInput(-1))
        );
        assert_eq!(
            CalcError::NegativeFactorialInput(-1).to_string(),
            "negative factorial input: -1"
        );
    }

    #[test]
    fn is_prime_small_non_primes() {
        let engine = CalculatorEngine::new();
        for n in [-5, -1, 0, 1] {
            assert!(!engine.is_prime(n), "{n} reported prime");
        }
    }

    #[test]
    fn is_prime_primes() {
        let engine = CalculatorEngine::new();
        for n in [2, 3, 5, 7, 11, 13, 17, 19, 23, 29] {
            assert!(engine.is_prime(n), "{n} reported composite");
        }
    }

    #[test]
    fn is_prime_composites() {
        let engine = CalculatorEngine::new();
        for n in [4, 6, 8, 9, 10, 12, 14, 15, 16, 18, 20, 21, 22, 25, 49] {
            assert!(!engine.is_prime(n), "{n} reported prime");
        }
    }

    #[test]
    fn is_prime_wheel_divisors() {
        let engine = CalculatorEngine::new();
        // 7 * 13, 11 * 13, 5 * 7 hit the i + 2 arm of the wheel.
        assert!(!engine.is_prime(91));
        assert!(!engine.is_prime(143));
        assert!(!engine.is_prime(35));
        assert!(engine.is_prime(7919));
        assert!(engine.is_prime(2_147_483_647));
    }

    #[test]
    fn is_prime_near_i64_max_terminates() {
        let engine = CalculatorEngine::new();
        // 2^63 - 1 = 7^2 * 73 * 127 * 337 * 92737 * 649657
        assert!(!engine.is_prime(i64::MAX));
    }

    #[test]
    fn operation_count_tracks_every_counted_call() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.operation_count(), 0);

        engine.add(1, 2);
        assert_eq!(engine.operation_count(), 1);
        engine.multiply(3, 4);
        assert_eq!(engine.operation_count(), 2);
        engine.divide(10.0, 2.0).unwrap();
        assert_eq!(engine.operation_count(), 3);
        engine.subtract(3, 4);
        engine.factorial(4).unwrap();
        assert_eq!(engine.operation_count(), 5);
    }

    #[test]
    fn failed_calls_are_counted() {
        let engine = CalculatorEngine::new();
        assert!(engine.divide(1.0, 0.0).is_err());
        assert_eq!(engine.operation_count(), 1);
        assert!(engine.factorial(-3).is_err());
        assert_eq!(engine.operation_count(), 2);
    }

    #[test]
    fn is_prime_and_reads_are_not_counted() {
        let engine = CalculatorEngine::new();
        engine.add(1, 1);
        let _ = engine.is_prime(97);
        let _ = engine.is_prime(-4);
        assert_eq!(engine.operation_count(), 1);
        assert_eq!(engine.operation_count(), 1);
    }

    #[test]
    fn reset_zeroes_counter() {
        let engine = CalculatorEngine::new();
        engine.add(1, 1);
        engine.multiply(0, 9);
        let _ = engine.divide(1.0, 0.0);
        engine.reset();
        assert_eq!(engine.operation_count(), 0);
        engine.add(1, 1);
        assert_eq!(engine.operation_count(), 1);
    }

    #[test]
    fn concurrent_adds_never_lose_increments() {
        let engine = CalculatorEngine::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for i in 0..1_000 {
                        engine.add(i, 1);
                    }
                });
            }
        });
        assert_eq!(engine.operation_count(), 8_000);
    }

    #[test]
    fn observer_sees_sequence_and_failures() {
        let history = Arc::new(HistoryObserver::new());
        let engine = CalculatorEngine::with_observer(history.clone());
        engine.multiply(5, 3);
        let _ = engine.divide(10.0, 0.0);
        let _ = engine.is_prime(7);
        engine.reset();
        engine.factorial(3).unwrap();

        let records = history.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].to_string(), "#1 multiply(5, 3) = 15");
        assert_eq!(records[1].to_string(), "#2 divide(10, 0) = error: division by zero");
        assert_eq!(records[2].to_string(), "#1 factorial(3) = 6");
    }

    #[test]
    fn debug_shows_counter() {
        let engine = CalculatorEngine::new();
        engine.add(1, 2);
        let s = format!("{engine:?}");
        assert!(s.contains("operation_count: 1"));
    }
}
