//! calcrs: counting arithmetic calculator.

use calcrs_core::exit_codes;
use calcrs_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();

    // Logs go to stderr so stdout stays parseable
    let level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match app::run(&config) {
        Ok(code) if code == exit_codes::SUCCESS => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(errors::exit_code_for(&err));
        }
    }
}
