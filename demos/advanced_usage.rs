// demos/advanced_usage.rs

//! Composition patterns on top of `run_process`: new sessions, fan-out,
//! retries, batches, pipelines and monitoring a long-running process.
//!
//! Run with `cargo run --example advanced_usage`.

use std::time::Duration;

use anyhow::Result;
use async_runner::compose::{run_all, run_batches, run_pipeline, run_with_retry, RetryPolicy};
use async_runner::{configure_logger, run_process, ExecutionOptions, Job, ProcessRunner};

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

fn captured(name: &str) -> ExecutionOptions {
    ExecutionOptions::new().capture_output(true).process_name(name)
}

async fn new_session_example() -> Result<()> {
    println!("=== New Session ===");
    let ok = run_process(
        sh("echo 'Background process started'; sleep 0.5; echo 'Background process done'"),
        &captured("Background Process").start_new_session(true),
    )
    .await?;
    println!("Background process completed: {ok}");
    Ok(())
}

async fn concurrent_execution(runner: &ProcessRunner) -> Result<()> {
    println!("\n=== Concurrent Execution ===");
    let jobs = (1..=3)
        .map(|i| {
            Job::new(
                sh(&format!("sleep 0.{i}; echo 'Task {i} complete'")),
                captured(&format!("Task {i}")),
            )
        })
        .collect();

    for (i, ok) in run_all(runner, jobs, RetryPolicy::once()).await?.into_iter().enumerate() {
        println!("Task {} succeeded: {ok}", i + 1);
    }
    Ok(())
}

async fn error_recovery_example(runner: &ProcessRunner) -> Result<()> {
    println!("\n=== Error Recovery ===");
    let flaky = Job::new(
        sh("[ $(od -An -N1 -tu1 /dev/urandom) -gt 180 ]"),
        captured("Retry"),
    );
    let ok = run_with_retry(
        runner,
        &flaky,
        RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(100),
        },
    )
    .await?;
    println!("Flaky command succeeded: {ok}");
    Ok(())
}

async fn batch_processing_example(runner: &ProcessRunner) -> Result<()> {
    println!("\n=== Batch Processing ===");
    let jobs = ["file1.txt", "file2.txt", "file3.txt", "file4.txt"]
        .iter()
        .map(|file| {
            Job::new(
                sh(&format!("echo 'Processing {file}'; sleep 0.1")),
                captured(&format!("Process {file}")),
            )
        })
        .collect();

    let results = run_batches(runner, jobs, 2, RetryPolicy::once()).await?;
    println!("Batch results: {results:?}");
    Ok(())
}

async fn pipeline_example(runner: &ProcessRunner) -> Result<()> {
    println!("\n=== Pipeline ===");
    let steps = vec![
        Job::new(["echo", "raw_data"], captured("Data Ingestion")),
        Job::new(sh("echo cleaned_data"), captured("Data Cleaning")),
        Job::new(sh("echo processed_data"), captured("Data Processing")),
        Job::new(sh("echo final_output"), captured("Final Output")),
    ];

    let outcome = run_pipeline(runner, &steps, RetryPolicy::once()).await?;
    match outcome.failed_step {
        None => println!("Pipeline completed: {} steps", outcome.steps_run),
        Some(step) => println!("Pipeline failed at step {}: {step}", outcome.steps_run),
    }
    Ok(())
}

async fn monitoring_example(runner: &ProcessRunner) -> Result<()> {
    println!("\n=== Monitoring ===");
    let options = captured("Long Running Process");
    let work = runner.execute(
        sh("for i in 0 1 2 3 4; do echo \"Working... $i\"; sleep 0.1; done"),
        &options,
    );
    let monitor = async {
        for _ in 0..3 {
            println!("Monitoring process...");
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    let (ok, ()) = tokio::join!(work, monitor);
    println!("Process completed: {}", ok?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logger(None)?;
    let runner = ProcessRunner::default();

    new_session_example().await?;
    concurrent_execution(&runner).await?;
    error_recovery_example(&runner).await?;
    batch_processing_example(&runner).await?;
    pipeline_example(&runner).await?;
    monitoring_example(&runner).await?;

    println!("\n=== Done ===");
    Ok(())
}
