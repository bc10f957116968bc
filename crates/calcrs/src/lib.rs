//! Application logic for the calcrs binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
