// src/lib.rs

//! Asynchronous subprocess execution with a boolean-first contract.
//!
//! ```no_run
//! use async_runner::{run_process, ExecutionOptions};
//!
//! # async fn demo() -> async_runner::errors::Result<()> {
//! let ok = run_process(
//!     ["echo", "hello"],
//!     &ExecutionOptions::new().capture_output(true).process_name("greeting"),
//! )
//! .await?;
//! assert!(ok);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod compose;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::ffi::OsStr;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use tracing::info;

use crate::cli::{CliArgs, CliCommand, JobsArgs, JobsMode, RunArgs};
use crate::compose::RetryPolicy;
use crate::errors::Result;

pub use crate::exec::{LifecycleEvent, LifecycleSink, ProcessRunner, TracingSink};
pub use crate::logging::configure_logger;
pub use crate::types::{ExecutionOptions, ExecutionOutcome, FailureReason, Job};

/// Run `command` with the default tracing sink and return whether it exited
/// with code 0.
pub async fn run_process<I, S>(command: I, options: &ExecutionOptions) -> Result<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ProcessRunner::default().execute(command, options).await
}

/// Run `command` with the default tracing sink and return the full outcome.
pub async fn run_process_with_output<I, S>(
    command: I,
    options: &ExecutionOptions,
) -> Result<ExecutionOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ProcessRunner::default()
        .execute_with_output(command, options)
        .await
}

/// High-level entry point used by `main.rs`. Returns whether everything
/// that ran succeeded.
pub async fn run(args: CliArgs) -> AnyResult<bool> {
    let runner = ProcessRunner::default();
    match args.command {
        CliCommand::Run(run) => run_single(&runner, run).await,
        CliCommand::Jobs(jobs) => run_jobs(&runner, jobs).await,
    }
}

async fn run_single(runner: &ProcessRunner, args: RunArgs) -> AnyResult<bool> {
    let mut options = ExecutionOptions::new()
        .capture_output(args.capture)
        .start_new_session(args.new_session);
    options.process_name = args.name;
    options.working_directory = args.cwd;
    for (key, value) in args.env {
        options = options.env(key, value);
    }

    let outcome = runner
        .execute_with_output(&args.command, &options)
        .await
        .context("running command")?;

    if let Some(stdout) = &outcome.stdout {
        std::io::stdout().write_all(stdout.as_bytes())?;
    }
    if let Some(stderr) = &outcome.stderr {
        std::io::stderr().write_all(stderr.as_bytes())?;
    }

    Ok(outcome.success)
}

async fn run_jobs(runner: &ProcessRunner, args: JobsArgs) -> AnyResult<bool> {
    let file = config::load_and_validate(&args.config)
        .with_context(|| format!("loading job file '{}'", args.config.display()))?;
    let jobs = file.jobs();
    info!(jobs = jobs.len(), mode = ?args.mode, "running job file");

    let policy = RetryPolicy {
        max_attempts: args.attempts,
        delay: Duration::from_millis(args.retry_delay_ms),
    };

    let ok = match args.mode {
        JobsMode::Parallel => all_succeeded(&compose::run_all(runner, jobs, policy).await?),
        JobsMode::Batch => all_succeeded(
            &compose::run_batches(runner, jobs, args.batch_size, policy).await?,
        ),
        JobsMode::Pipeline => compose::run_pipeline(runner, &jobs, policy)
            .await?
            .is_success(),
    };

    Ok(ok)
}

fn all_succeeded(results: &[bool]) -> bool {
    results.iter().all(|ok| *ok)
}
