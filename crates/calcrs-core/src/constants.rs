//! Constants for the engine, the complex calculation policy and the CLI.

/// Label attached to every complex calculation result.
pub const COMPLEX_CALCULATION_LABEL: &str = "complex calculation";

/// Dividend used by the both-negative branch of the complex calculation.
pub const BOTH_NEGATIVE_DIVIDEND: f64 = 100.0;

/// Mixed-sign magnitude sum above which the policy switches to factorial.
pub const MIXED_SIGN_SUM_THRESHOLD: i64 = 10;

/// Largest argument the mixed-sign branch passes to `factorial`.
pub const MIXED_SIGN_FACTORIAL_CAP: i64 = 10;

/// Largest n whose factorial fits in an `i64`.
/// 20! = 2432902008176640000
pub const MAX_FACTORIAL_I64: i64 = 20;

/// Precomputed factorials for n = 0..=20.
///
/// 20! = 2,432,902,008,176,640,000 is the largest factorial that fits in
/// `i64`. 21! = 51,090,942,171,709,440,000 overflows `i64::MAX`
/// (9,223,372,036,854,775,807).
pub const FACTORIAL_TABLE: [i64; 21] = {
    let mut table = [1i64; 21];
    let mut i = 2;
    while i < 21 {
        table[i] = table[i - 1] * i as i64;
        i += 1;
    }
    table
};

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// An engine operation failed (division by zero, bad factorial input).
    pub const ERROR_CALCULATION: i32 = 2;
    /// The request could not be parsed or failed boundary validation.
    pub const ERROR_INVALID_REQUEST: i32 = 3;
    /// Invalid configuration or unreadable input.
    pub const ERROR_CONFIG: i32 = 4;
}
