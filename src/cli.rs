// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `async-runner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "async-runner",
    version,
    about = "Run external commands asynchronously and report whether they succeeded.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ASYNC_RUNNER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run a single command.
    Run(RunArgs),
    /// Run the jobs listed in a TOML job file.
    Jobs(JobsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Capture stdout/stderr and print them once the command has finished.
    #[arg(long)]
    pub capture: bool,

    /// Start the command in a new session.
    #[arg(long)]
    pub new_session: bool,

    /// Label used in log output (defaults to the executable).
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Working directory for the command.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Replace the environment with these variables (repeatable).
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// The command and its arguments.
    #[arg(trailing_var_arg = true, required = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct JobsArgs {
    /// Path to the job file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// How the jobs are composed.
    #[arg(long, value_enum, default_value_t = JobsMode::Parallel)]
    pub mode: JobsMode,

    /// Jobs per batch in `batch` mode.
    #[arg(long, default_value_t = 2)]
    pub batch_size: usize,

    /// Attempts per job (1 = no retries).
    #[arg(long, default_value_t = 1)]
    pub attempts: u32,

    /// Delay between attempts, in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub retry_delay_ms: u64,
}

/// Composition strategy for the `jobs` subcommand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum JobsMode {
    /// All jobs at once.
    Parallel,
    /// One after another, stopping at the first failure.
    Pipeline,
    /// Fixed-size concurrent batches, one batch after another.
    Batch,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid environment assignment '{s}' (expected KEY=VALUE)")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
