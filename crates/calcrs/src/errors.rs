//! Error handling and exit codes.

use calcrs_core::exit_codes;
use calcrs_orchestration::RequestError;

/// Errors raised by the application shell itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No subcommand and no completion request.
    #[error("no command given (see --help)")]
    MissingCommand,
}

/// Map a request error to the process exit code.
pub fn exit_code(err: &RequestError) -> i32 {
    match err {
        RequestError::Calculation(_) => exit_codes::ERROR_CALCULATION,
        RequestError::Line { error, .. } => exit_code(error),
        RequestError::Empty
        | RequestError::UnknownOperation(_)
        | RequestError::Arity { .. }
        | RequestError::InvalidOperand(_)
        | RequestError::Validation(_)
        | RequestError::OrderDependent(_) => exit_codes::ERROR_INVALID_REQUEST,
    }
}

/// Map any top-level error to the process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<RequestError>() {
        exit_code(e)
    } else if err.downcast_ref::<AppError>().is_some()
        || err.downcast_ref::<std::io::Error>().is_some()
    {
        exit_codes::ERROR_CONFIG
    } else {
        exit_codes::ERROR_GENERIC
    }
}
