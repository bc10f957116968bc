#![no_main]

use libfuzzer_sys::fuzz_target;

use calcrs_core::{Branch, CalculatorEngine, ComplexCalculationPolicy};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let a = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let b = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);

    let engine = CalculatorEngine::new();
    let result = ComplexCalculationPolicy::new(&engine)
        .evaluate(a, b)
        .expect("complex calculation failed");

    assert_eq!(result.label, "complex calculation");
    assert!(result.value.is_finite(), "non-finite result for ({a}, {b})");

    let calls = engine.operation_count();
    match result.branch {
        Branch::EitherZero => assert_eq!(calls, 1),
        Branch::BothNegative if a == b => assert_eq!(calls, 1),
        _ => assert_eq!(calls, 2, "call count for ({a}, {b})"),
    }
});
