// src/types.rs

//! Value types shared by the runner, the composition helpers and the job
//! file loader.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Per-invocation execution options. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Detach the child into its own session (unix `setsid`).
    pub start_new_session: bool,

    /// Pipe stdout/stderr into the outcome instead of inheriting them.
    pub capture_output: bool,

    /// Label attached to every lifecycle event. Defaults to `command[0]`.
    pub process_name: Option<String>,

    /// Directory the child is spawned in.
    #[serde(alias = "cwd")]
    pub working_directory: Option<PathBuf>,

    /// When set, replaces the child's environment entirely.
    #[serde(alias = "env")]
    pub environment: Option<BTreeMap<String, String>>,
}

impl ExecutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_new_session(mut self, val: bool) -> Self {
        self.start_new_session = val;
        self
    }

    pub fn capture_output(mut self, val: bool) -> Self {
        self.capture_output = val;
        self
    }

    pub fn process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = Some(name.into());
        self
    }

    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Add one variable to the replacement environment, creating it if
    /// needed.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Why an invocation did not succeed.
///
/// The boolean outcome is the primary contract; this tag is only for callers
/// that want to tell failure causes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The command was rejected before anything was spawned.
    Configuration(String),
    /// The OS refused to create the process (missing executable, permissions).
    Spawn(String),
    /// The process ran and exited with a non-zero code.
    NonZeroExit(i32),
    /// The process was terminated by a signal (unix).
    Signal(i32),
    /// Waiting for the process failed.
    Wait(String),
    /// Reading a captured pipe failed.
    Io(String),
    /// The calling task was cancelled while the child was running.
    Cancelled,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Configuration(msg) => write!(f, "invalid invocation: {msg}"),
            FailureReason::Spawn(msg) => write!(f, "failed to spawn: {msg}"),
            FailureReason::NonZeroExit(code) => write!(f, "exited with code {code}"),
            FailureReason::Signal(sig) => write!(f, "terminated by signal {sig}"),
            FailureReason::Wait(msg) => write!(f, "failed to wait: {msg}"),
            FailureReason::Io(msg) => write!(f, "failed to read output: {msg}"),
            FailureReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// True iff the child exited with code 0 and nothing went wrong around it.
    pub success: bool,
    /// Exit code, when the process ran and exited normally.
    pub exit_code: Option<i32>,
    /// Captured stdout (only with `capture_output`).
    pub stdout: Option<String>,
    /// Captured stderr (only with `capture_output`).
    pub stderr: Option<String>,
    /// Failure tag; `None` on success.
    pub failure: Option<FailureReason>,
}

impl ExecutionOutcome {
    /// Outcome for a process that never started.
    pub(crate) fn not_started(reason: FailureReason) -> Self {
        Self {
            success: false,
            failure: Some(reason),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl From<ExecutionOutcome> for bool {
    fn from(outcome: ExecutionOutcome) -> Self {
        outcome.success
    }
}

/// A command bundled with its options, as used by the composition helpers
/// and produced by the job file loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub command: Vec<OsString>,
    pub options: ExecutionOptions,
}

impl Job {
    pub fn new<I, S>(command: I, options: ExecutionOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// Label used in logs: the explicit process name, else `command[0]`.
    pub fn label(&self) -> String {
        crate::exec::resolve_label(&self.command, &self.options)
    }
}
