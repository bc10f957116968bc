//! Property-based tests for the engine and the complex calculation.

use proptest::prelude::*;

use calcrs_core::{Branch, CalcError, CalculatorEngine, ComplexCalculationPolicy};

/// Reference primality by plain trial division.
fn naive_is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// add and subtract agree with native arithmetic on the i32 range.
    #[test]
    fn add_subtract_match_native(a in any::<i32>(), b in any::<i32>()) {
        let engine = CalculatorEngine::new();
        let (a, b) = (i64::from(a), i64::from(b));
        prop_assert_eq!(engine.add(a, b), a + b);
        prop_assert_eq!(engine.subtract(a, b), a - b);
        prop_assert_eq!(engine.operation_count(), 2);
    }

    /// A zero operand always yields zero; otherwise the plain product.
    #[test]
    fn multiply_matches_native(a in any::<i32>(), b in any::<i32>()) {
        let engine = CalculatorEngine::new();
        let (a, b) = (i64::from(a), i64::from(b));
        prop_assert_eq!(engine.multiply(a, 0), 0);
        prop_assert_eq!(engine.multiply(0, b), 0);
        prop_assert_eq!(engine.multiply(a, b), a * b);
    }

    /// divide fails iff the divisor is zero and is counted either way.
    #[test]
    fn divide_fails_only_on_zero(a in -1.0e9f64..1.0e9, b in -1.0e9f64..1.0e9) {
        let engine = CalculatorEngine::new();
        match engine.divide(a, b) {
            Ok(q) => {
                prop_assert!(b != 0.0);
                prop_assert!((q * b - a).abs() <= 1e-6 * a.abs().max(1.0));
            }
            Err(e) => {
                prop_assert_eq!(b, 0.0);
                prop_assert_eq!(e, CalcError::DivisionByZero);
            }
        }
        prop_assert_eq!(engine.divide(a, 0.0), Err(CalcError::DivisionByZero));
        prop_assert_eq!(engine.operation_count(), 2);
    }

    /// factorial fails iff n < 0 or n > 20; otherwise n! = n * (n-1)!.
    #[test]
    fn factorial_recurrence(n in -50i64..50) {
        let engine = CalculatorEngine::new();
        let result = engine.factorial(n);
        if n < 0 {
            prop_assert_eq!(result, Err(CalcError::NegativeFactorialInput(n)));
        } else if n > 20 {
            prop_assert_eq!(result, Err(CalcError::FactorialOverflow(n)));
        } else if n >= 1 {
            let prev = engine.factorial(n - 1).unwrap();
            prop_assert_eq!(result, Ok(n * prev));
        } else {
            prop_assert_eq!(result, Ok(1));
        }
    }

    /// The 6k±1 wheel agrees with naive trial division.
    #[test]
    fn is_prime_matches_naive(n in -100i64..200_000) {
        let engine = CalculatorEngine::new();
        prop_assert_eq!(engine.is_prime(n), naive_is_prime(n), "n = {}", n);
        prop_assert_eq!(engine.operation_count(), 0);
    }

    /// The complex calculation never fails for any pair of i32 inputs.
    #[test]
    fn complex_never_fails(a in any::<i32>(), b in any::<i32>()) {
        let engine = CalculatorEngine::new();
        let result = ComplexCalculationPolicy::new(&engine).evaluate(a, b);
        prop_assert!(result.is_ok());
        let result = result.unwrap();
        prop_assert_eq!(result.label, "complex calculation");
        prop_assert!(result.value.is_finite());
    }

    /// Branch selection follows the sign priority order.
    #[test]
    fn complex_branch_priority(a in any::<i32>(), b in any::<i32>()) {
        let engine = CalculatorEngine::new();
        let branch = ComplexCalculationPolicy::new(&engine).evaluate(a, b).unwrap().branch;
        let expected = if a > 0 && b > 0 {
            Branch::BothPositive
        } else if a < 0 && b < 0 {
            Branch::BothNegative
        } else if a == 0 || b == 0 {
            Branch::EitherZero
        } else {
            Branch::MixedSigns
        };
        prop_assert_eq!(branch, expected);
    }

    /// reset after any sequence of calls brings the counter back to zero.
    #[test]
    fn reset_round_trip(ops in proptest::collection::vec((0u8..6, any::<i16>(), any::<i16>()), 0..40)) {
        let engine = CalculatorEngine::new();
        let mut expected = 0u64;
        for (op, a, b) in ops {
            let (a, b) = (i64::from(a), i64::from(b));
            match op {
                0 => { engine.add(a, b); expected += 1; }
                1 => { engine.subtract(a, b); expected += 1; }
                2 => { engine.multiply(a, b); expected += 1; }
                3 => { let _ = engine.divide(a as f64, b as f64); expected += 1; }
                4 => { let _ = engine.factorial(a % 25); expected += 1; }
                _ => { let _ = engine.is_prime(a); }
            }
        }
        prop_assert_eq!(engine.operation_count(), expected);
        engine.reset();
        prop_assert_eq!(engine.operation_count(), 0);
    }
}

/// End-to-end scenarios covering each branch of the complex calculation.
#[test]
fn complex_scenarios() {
    let cases: [(i32, i32, f64); 5] = [
        (5, 3, 23.0),
        (-5, -3, 50.0),
        (0, 5, 5.0),
        (-10, 5, 3_628_800.0),
        (-3, 5, -15.0),
    ];
    for (a, b, expected) in cases {
        let engine = CalculatorEngine::new();
        let r = ComplexCalculationPolicy::new(&engine).evaluate(a, b).unwrap();
        assert!(
            (r.value - expected).abs() < 1e-9,
            "({a}, {b}) gave {}, expected {expected}",
            r.value
        );
        assert_eq!(r.label, "complex calculation");
    }
}
