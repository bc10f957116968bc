//! The sign-based complex calculation.
//!
//! `ComplexCalculationPolicy` composes several engine calls into a single
//! value. Which calls it makes depends only on the signs of its two inputs,
//! checked in a fixed order where the first match wins:
//!
//! 1. both positive: `multiply(a, b) + add(a, b)`
//! 2. both negative: `100 / subtract(|a|, |b|)`, or 0 when the magnitudes
//!    are equal (`divide` is then never called)
//! 3. either zero: `add(a, b)`
//! 4. opposite signs: `factorial(10)` when `|a| + |b| > 10`, otherwise
//!    `multiply(a, b)`
//!
//! Inputs are `i32` and widened to `i64` before reaching the engine, so
//! `|i32::MIN|` and every product the policy forms are exact. Given that,
//! the policy never produces an error: branch 2 guards its divisor and
//! branch 4 only ever asks for `10!`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOTH_NEGATIVE_DIVIDEND, COMPLEX_CALCULATION_LABEL, MIXED_SIGN_FACTORIAL_CAP,
    MIXED_SIGN_SUM_THRESHOLD,
};
use crate::engine::{CalcError, CalculatorEngine};

/// Which sign combination selected the computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    BothPositive,
    BothNegative,
    EitherZero,
    MixedSigns,
}

/// Outcome of [`ComplexCalculationPolicy::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexResult {
    pub value: f64,
    /// Always [`COMPLEX_CALCULATION_LABEL`].
    pub label: &'static str,
    pub branch: Branch,
}

/// Decision procedure over two integers, driving a borrowed engine.
#[derive(Debug, Clone, Copy)]
pub struct ComplexCalculationPolicy<'a> {
    engine: &'a CalculatorEngine,
}

impl<'a> ComplexCalculationPolicy<'a> {
    #[must_use]
    pub fn new(engine: &'a CalculatorEngine) -> Self {
        Self { engine }
    }

    /// Run the complex calculation for `(a, b)`.
    ///
    /// # Errors
    ///
    /// Propagates engine errors. None is reachable for `i32` inputs; the
    /// `Result` mirrors the fallible engine calls underneath.
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(&self, a: i32, b: i32) -> Result<ComplexResult, CalcError> {
        let engine = self.engine;
        let (a, b) = (i64::from(a), i64::from(b));

        let (value, branch) = if a > 0 && b > 0 {
            let value = engine.multiply(a, b) + engine.add(a, b);
            (value as f64, Branch::BothPositive)
        } else if a < 0 && b < 0 {
            let diff = engine.subtract(a.abs(), b.abs());
            let value = if diff != 0 {
                engine.divide(BOTH_NEGATIVE_DIVIDEND, diff as f64)?
            } else {
                0.0
            };
            (value, Branch::BothNegative)
        } else if a == 0 || b == 0 {
            (engine.add(a, b) as f64, Branch::EitherZero)
        } else {
            let sum = engine.add(a.abs(), b.abs());
            let value = if sum > MIXED_SIGN_SUM_THRESHOLD {
                engine.factorial(sum.min(MIXED_SIGN_FACTORIAL_CAP))? as f64
            } else {
                engine.multiply(a, b) as f64
            };
            (value, Branch::MixedSigns)
        };

        Ok(ComplexResult {
            value,
            label: COMPLEX_CALCULATION_LABEL,
            branch,
        })
    }
}
