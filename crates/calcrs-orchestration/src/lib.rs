//! # calcrs-orchestration
//!
//! Request parsing, execution against a shared engine, and batch runs.

pub mod executor;
pub mod interfaces;
pub mod request;

pub use executor::{execute, execute_batch, BatchMode, BatchOptions, BatchReport};
pub use interfaces::{CalculationResponse, ResultPresenter};
pub use request::{parse_script, Request, RequestError};
