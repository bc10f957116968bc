#![no_main]

use libfuzzer_sys::fuzz_target;

use calcrs_core::CalculatorEngine;
use calcrs_orchestration::{execute_batch, parse_script, BatchOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Parse errors are fine; accepted scripts must run without panicking
    let Ok(requests) = parse_script(text) else {
        return;
    };
    let engine = CalculatorEngine::new();
    let report = execute_batch(&engine, &requests, BatchOptions::default())
        .expect("sequential batch rejected");
    assert_eq!(report.entries.len(), requests.len());
});
