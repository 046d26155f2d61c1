// src/exec/runner.rs

//! The single execution primitive: spawn one process, optionally capture its
//! output, wait for it and report whether it succeeded.

use std::ffi::{OsStr, OsString};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use tokio::process::Command;
use tracing::debug;

use crate::errors::{Result, RunnerError};
use crate::exec::capture::{self, Captured};
use crate::exec::events::{LifecycleEvent, LifecycleSink, TracingSink};
use crate::exec::session::configure_session;
use crate::types::{ExecutionOptions, ExecutionOutcome, FailureReason};

/// Runs commands and reports lifecycle events to a sink.
///
/// A runner holds no per-invocation state, so one instance (or clones of it)
/// can serve any number of concurrent invocations.
#[derive(Clone)]
pub struct ProcessRunner {
    sink: Arc<dyn LifecycleSink>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl std::fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRunner").finish_non_exhaustive()
    }
}

impl ProcessRunner {
    pub fn new(sink: Arc<dyn LifecycleSink>) -> Self {
        Self { sink }
    }

    /// Run `command` and return whether it exited with code 0.
    ///
    /// Spawn failures, pipe errors and non-zero exits all yield `Ok(false)`;
    /// only an empty command is an error.
    pub async fn execute<I, S>(&self, command: I, options: &ExecutionOptions) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let outcome = self.execute_with_output(command, options).await?;
        Ok(outcome.success)
    }

    /// Like [`execute`](Self::execute), but returns the full outcome including
    /// captured output and the failure tag.
    ///
    /// If the returned future is dropped before completion the child is
    /// killed and a `Cancelled` failure event is emitted.
    pub async fn execute_with_output<I, S>(
        &self,
        command: I,
        options: &ExecutionOptions,
    ) -> Result<ExecutionOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let command: Vec<OsString> = command
            .into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect();
        let label = resolve_label(&command, options);

        let Some((program, args)) = command.split_first() else {
            let msg = "command must contain at least an executable".to_string();
            self.sink.emit(LifecycleEvent::Failure {
                label,
                exit_code: None,
                reason: FailureReason::Configuration(msg.clone()),
                tail: None,
            });
            return Err(RunnerError::ConfigError(msg));
        };

        self.sink.emit(LifecycleEvent::Start {
            label: label.clone(),
            command: display_command(&command),
        });

        let guard = TerminalGuard {
            sink: self.sink.as_ref(),
            label: &label,
            armed: true,
        };
        let outcome = run_child(program, args, options).await;
        guard.finish(&outcome);

        Ok(outcome)
    }
}

/// Log label for an invocation: the explicit process name, else the
/// executable.
pub fn resolve_label(command: &[OsString], options: &ExecutionOptions) -> String {
    match (&options.process_name, command.first()) {
        (Some(name), _) => name.clone(),
        (None, Some(program)) => program.to_string_lossy().into_owned(),
        (None, None) => "<empty command>".to_string(),
    }
}

fn display_command(command: &[OsString]) -> Vec<String> {
    command
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Emits the terminal event exactly once: explicitly through
/// [`finish`](Self::finish), or as `Cancelled` when dropped while armed.
struct TerminalGuard<'a> {
    sink: &'a dyn LifecycleSink,
    label: &'a str,
    armed: bool,
}

impl TerminalGuard<'_> {
    fn finish(mut self, outcome: &ExecutionOutcome) {
        self.armed = false;

        let label = self.label.to_string();
        let event = match &outcome.failure {
            None => LifecycleEvent::Success {
                label,
                exit_code: outcome.exit_code.unwrap_or_default(),
            },
            Some(reason) => LifecycleEvent::Failure {
                label,
                exit_code: outcome.exit_code,
                reason: reason.clone(),
                tail: capture::failure_tail(outcome.stdout.as_deref(), outcome.stderr.as_deref()),
            },
        };
        self.sink.emit(event);
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.sink.emit(LifecycleEvent::Failure {
                label: self.label.to_string(),
                exit_code: None,
                reason: FailureReason::Cancelled,
                tail: None,
            });
        }
    }
}

async fn run_child(
    program: &OsStr,
    args: &[OsString],
    options: &ExecutionOptions,
) -> ExecutionOutcome {
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);

    if let Some(dir) = &options.working_directory {
        cmd.current_dir(dir);
    }
    if let Some(env) = &options.environment {
        cmd.env_clear().envs(env);
    }
    configure_session(&mut cmd, options.start_new_session);

    if options.capture_output {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            return ExecutionOutcome::not_started(FailureReason::Spawn(err.to_string()));
        }
    };
    debug!(pid = ?child.id(), "process spawned");

    if options.capture_output {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes while waiting; the drains are part of this future,
        // so they are dropped with it on cancellation.
        let (status, stdout, stderr) = tokio::join!(
            child.wait(),
            capture::drain(stdout),
            capture::drain(stderr)
        );
        build_outcome(status, Some((stdout, stderr)))
    } else {
        let status = child.wait().await;
        build_outcome(status, None)
    }
}

fn build_outcome(
    status: std::io::Result<ExitStatus>,
    captured: Option<(Captured, Captured)>,
) -> ExecutionOutcome {
    let mut outcome = ExecutionOutcome::default();
    let mut pipe_error = None;

    if let Some((stdout, stderr)) = captured {
        outcome.stdout = Some(stdout.text());
        outcome.stderr = Some(stderr.text());
        pipe_error = stdout.error.or(stderr.error);
    }

    let status = match status {
        Ok(status) => status,
        Err(err) => {
            outcome.failure = Some(FailureReason::Wait(err.to_string()));
            return outcome;
        }
    };

    outcome.exit_code = status.code();
    outcome.failure = if let Some(err) = pipe_error {
        Some(FailureReason::Io(err.to_string()))
    } else if status.success() {
        None
    } else {
        Some(match (status.code(), exit_signal(&status)) {
            (Some(code), _) => FailureReason::NonZeroExit(code),
            (None, Some(sig)) => FailureReason::Signal(sig),
            (None, None) => FailureReason::Wait("process exited without a status code".to_string()),
        })
    };
    outcome.success = outcome.failure.is_none();

    outcome
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
