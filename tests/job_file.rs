// tests/job_file.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, TestResult};

use std::io::Write;

use async_runner::cli::CliArgs;
use async_runner::config::load_and_validate;
use async_runner::errors::RunnerError;
use clap::Parser;
use tempfile::NamedTempFile;

fn job_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

const PIPELINE: &str = r#"
[[job]]
name = "Data Ingestion"
cmd = ["echo", "raw_data"]
capture_output = true

[[job]]
name = "Data Cleaning"
cmd = ["sh", "-c", "echo cleaned_data"]
capture_output = true
"#;

#[test]
fn job_file_is_loaded_in_order() -> TestResult {
    init_tracing();
    let file = job_file(PIPELINE);

    let jobs = load_and_validate(file.path())?.jobs();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].label(), "Data Ingestion");
    assert_eq!(jobs[1].label(), "Data Cleaning");
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let res = load_and_validate("/definitely/not/here/Runner.toml");
    assert!(matches!(res, Err(RunnerError::IoError(_))));
}

#[tokio::test]
async fn jobs_subcommand_runs_pipeline() -> TestResult {
    init_tracing();
    let file = job_file(PIPELINE);
    let path = file.path().to_str().unwrap().to_string();

    for mode in ["parallel", "pipeline", "batch"] {
        let args = CliArgs::try_parse_from([
            "async-runner",
            "jobs",
            "--config",
            path.as_str(),
            "--mode",
            mode,
        ])?;
        assert!(async_runner::run(args).await?, "mode {mode}");
    }
    Ok(())
}

#[tokio::test]
async fn jobs_subcommand_reports_failure() -> TestResult {
    init_tracing();
    let file = job_file(
        r#"
[[job]]
name = "ok"
cmd = ["true"]

[[job]]
name = "broken"
cmd = ["false"]
"#,
    );
    let path = file.path().to_str().unwrap().to_string();

    let args = CliArgs::try_parse_from([
        "async-runner",
        "jobs",
        "--config",
        path.as_str(),
        "--attempts",
        "2",
        "--retry-delay-ms",
        "1",
    ])?;
    assert!(!async_runner::run(args).await?);
    Ok(())
}

#[tokio::test]
async fn run_subcommand_executes_single_command() -> TestResult {
    init_tracing();

    let args = CliArgs::try_parse_from(["async-runner", "run", "--capture", "--", "true"])?;
    assert!(async_runner::run(args).await?);

    let args = CliArgs::try_parse_from(["async-runner", "run", "--name", "nope", "--", "false"])?;
    assert!(!async_runner::run(args).await?);
    Ok(())
}
