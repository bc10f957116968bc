//! Application entry point and dispatch.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use calcrs_cli::output::format_duration;
use calcrs_cli::{CLIResultPresenter, JsonResultPresenter};
use calcrs_core::observers::{HistoryObserver, LoggingObserver};
use calcrs_core::{exit_codes, CalculatorEngine, OperationSubject};
use calcrs_orchestration::{
    execute, execute_batch, parse_script, BatchMode, BatchOptions, CalculationResponse, Request,
    RequestError, ResultPresenter,
};

use crate::config::{AppConfig, Command};
use crate::errors::{self, AppError};

/// Run the application, returning the process exit code.
///
/// Request failures, including a rejected batch script, are presented and
/// turned into a non-zero code; only failures to read input come back as
/// `Err`.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        calcrs_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    let command = config.command.as_ref().ok_or(AppError::MissingCommand)?;
    debug!(version = %crate::version::full_version(), ?command, "starting");

    // Every engine call is logged and, for --details, recorded
    let history = Arc::new(HistoryObserver::new());
    let subject = OperationSubject::new();
    subject.register(Arc::new(LoggingObserver::new()));
    subject.register(history.clone());
    let engine = CalculatorEngine::with_observer(Arc::new(subject));

    let presenter: Box<dyn ResultPresenter> = if config.json {
        Box::new(JsonResultPresenter::new())
    } else {
        Box::new(CLIResultPresenter::new(config.quiet))
    };

    let session = Session {
        engine: &engine,
        history: &history,
        presenter: presenter.as_ref(),
        details: config.details,
    };

    match command {
        Command::Batch {
            script,
            parallel,
            fail_fast,
        } => {
            let opts = BatchOptions {
                mode: if *parallel {
                    BatchMode::Parallel
                } else {
                    BatchMode::Sequential
                },
                fail_fast: *fail_fast,
            };
            session.run_batch(script, opts)
        }
        single => match single.to_request() {
            Some(request) => Ok(session.run_single(&request)),
            None => Err(AppError::MissingCommand.into()),
        },
    }
}

/// One engine plus the means to show what it did.
struct Session<'a> {
    engine: &'a CalculatorEngine,
    history: &'a HistoryObserver,
    presenter: &'a dyn ResultPresenter,
    details: bool,
}

impl Session<'_> {
    fn run_single(&self, request: &Request) -> i32 {
        let (response, code) = match execute(self.engine, request) {
            Ok(response) => (response, exit_codes::SUCCESS),
            Err(e) => {
                warn!(%request, error = %e, "request failed");
                (CalculationResponse::error(&e), errors::exit_code(&e))
            }
        };
        self.presenter.present_response(&response);
        self.present_history();
        code
    }

    #[allow(clippy::cast_precision_loss)]
    fn run_batch(&self, script: &str, opts: BatchOptions) -> Result<i32> {
        let text = read_script(script)
            .with_context(|| format!("failed to read batch script '{script}'"))?;
        let requests = match parse_script(&text) {
            Ok(requests) => requests,
            Err(e) => return Ok(self.reject(&e)),
        };
        let report = match execute_batch(self.engine, &requests, opts) {
            Ok(report) => report,
            Err(e) => return Ok(self.reject(&e)),
        };

        for entry in &report.entries {
            self.presenter.present_response(&entry.response());
        }
        self.present_history();
        self.presenter.present_response(&CalculationResponse::new(
            report.operation_count as f64,
            "operations count",
        ));

        info!(
            requests = report.entries.len(),
            failures = report.failures(),
            duration = %format_duration(report.duration),
            "batch finished"
        );

        let code = report
            .entries
            .iter()
            .find_map(|e| e.outcome.as_ref().err())
            .map_or(exit_codes::SUCCESS, errors::exit_code);
        Ok(code)
    }

    /// Report a batch that was refused before any request ran.
    fn reject(&self, err: &RequestError) -> i32 {
        warn!(error = %err, "batch rejected");
        self.presenter.present_error(&err.to_string());
        errors::exit_code(err)
    }

    fn present_history(&self) {
        if self.details {
            self.presenter.present_trace(&self.history.take());
        }
    }
}

fn read_script(script: &str) -> std::io::Result<String> {
    if script == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(script)
    }
}
