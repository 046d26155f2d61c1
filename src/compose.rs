// src/compose.rs

//! Composition helpers built on [`ProcessRunner`].
//!
//! These cover the usual ways callers combine invocations: fan-out, fixed
//! size batches, early-exit pipelines and retry loops. All of them build
//! purely on the boolean outcome of [`ProcessRunner::execute`], and every
//! job goes through [`run_with_retry`] (a single attempt with
//! [`RetryPolicy::once`]).

use std::time::Duration;

use anyhow::anyhow;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::{Result, RunnerError};
use crate::exec::ProcessRunner;
use crate::types::Job;

/// Run all jobs concurrently and return their results in input order.
///
/// If any invocation returns an error (or its task panics) the remaining
/// invocations are aborted, which kills their children, and the error is
/// returned.
pub async fn run_all(
    runner: &ProcessRunner,
    jobs: Vec<Job>,
    policy: RetryPolicy,
) -> Result<Vec<bool>> {
    let mut set = JoinSet::new();
    let total = jobs.len();

    for (idx, job) in jobs.into_iter().enumerate() {
        let runner = runner.clone();
        set.spawn(async move {
            let res = run_with_retry(&runner, &job, policy).await;
            (idx, res)
        });
    }

    let mut results = vec![false; total];
    while let Some(joined) = set.join_next().await {
        let (idx, res) = joined.map_err(|e| anyhow!("fan-out task failed: {e}"))?;
        // Returning early drops `set`, aborting the siblings.
        results[idx] = res?;
    }

    debug!(
        total,
        succeeded = results.iter().filter(|ok| **ok).count(),
        "fan-out finished"
    );
    Ok(results)
}

/// Run jobs in consecutive batches of `batch_size`; each batch runs
/// concurrently via [`run_all`].
pub async fn run_batches(
    runner: &ProcessRunner,
    jobs: Vec<Job>,
    batch_size: usize,
    policy: RetryPolicy,
) -> Result<Vec<bool>> {
    if batch_size == 0 {
        return Err(RunnerError::ConfigError(
            "batch size must be >= 1 (got 0)".to_string(),
        ));
    }

    let mut results = Vec::with_capacity(jobs.len());
    let mut remaining = jobs.into_iter().peekable();
    let mut batch_no = 0usize;

    while remaining.peek().is_some() {
        batch_no += 1;
        let batch: Vec<Job> = remaining.by_ref().take(batch_size).collect();
        info!(batch = batch_no, size = batch.len(), "running batch");
        results.extend(run_all(runner, batch, policy).await?);
    }

    Ok(results)
}

/// Result of [`run_pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Steps that were started, including a failing one.
    pub steps_run: usize,
    /// Label of the step that failed, if any.
    pub failed_step: Option<String>,
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        self.failed_step.is_none()
    }
}

/// Run jobs one after another, stopping at the first failure.
pub async fn run_pipeline(
    runner: &ProcessRunner,
    jobs: &[Job],
    policy: RetryPolicy,
) -> Result<PipelineOutcome> {
    for (idx, job) in jobs.iter().enumerate() {
        if !run_with_retry(runner, job, policy).await? {
            let step = job.label();
            warn!(step = %step, index = idx + 1, "pipeline stopped at failing step");
            return Ok(PipelineOutcome {
                steps_run: idx + 1,
                failed_step: Some(step),
            });
        }
    }

    Ok(PipelineOutcome {
        steps_run: jobs.len(),
        failed_step: None,
    })
}

/// How often and how patiently [`run_with_retry`] retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(100),
        }
    }
}

/// Run `job` until it succeeds or `policy.max_attempts` is exhausted.
///
/// With more than one attempt allowed, each attempt is labelled
/// `"<label> (attempt i/n)"`.
pub async fn run_with_retry(
    runner: &ProcessRunner,
    job: &Job,
    policy: RetryPolicy,
) -> Result<bool> {
    if policy.max_attempts == 0 {
        return Err(RunnerError::ConfigError(
            "max_attempts must be >= 1 (got 0)".to_string(),
        ));
    }

    if policy.max_attempts == 1 {
        return runner.execute(&job.command, &job.options).await;
    }

    let label = job.label();
    for attempt in 1..=policy.max_attempts {
        let options = job
            .options
            .clone()
            .process_name(format!("{label} (attempt {attempt}/{})", policy.max_attempts));

        if runner.execute(&job.command, &options).await? {
            return Ok(true);
        }
        if attempt < policy.max_attempts {
            debug!(process = %label, attempt, "attempt failed; retrying");
            tokio::time::sleep(policy.delay).await;
        }
    }

    warn!(process = %label, attempts = policy.max_attempts, "all attempts failed");
    Ok(false)
}
