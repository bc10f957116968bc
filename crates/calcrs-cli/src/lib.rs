//! # calcrs-cli
//!
//! CLI output, result presenters, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;

pub use presenter::{CLIResultPresenter, JsonResultPresenter};
