// src/exec/events.rs

//! Lifecycle events and the sink they are delivered to.
//!
//! The runner never formats messages for humans; it hands structured
//! [`LifecycleEvent`]s to a [`LifecycleSink`]. Production code uses
//! [`TracingSink`], which turns each event into a single `tracing` record.
//! Tests can provide their own sink that records events for assertions.

use tracing::{error, info, warn};

use crate::types::FailureReason;

/// One lifecycle event of one invocation.
///
/// For every invocation that passes validation there is exactly one `Start`
/// followed by exactly one terminal event (`Success` or `Failure`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Start {
        label: String,
        command: Vec<String>,
    },
    Success {
        label: String,
        exit_code: i32,
    },
    Failure {
        label: String,
        exit_code: Option<i32>,
        reason: FailureReason,
        /// Last lines of captured output, when output was captured.
        tail: Option<String>,
    },
}

impl LifecycleEvent {
    pub fn label(&self) -> &str {
        match self {
            LifecycleEvent::Start { label, .. }
            | LifecycleEvent::Success { label, .. }
            | LifecycleEvent::Failure { label, .. } => label,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LifecycleEvent::Start { .. })
    }
}

/// Destination for lifecycle events.
///
/// Implementations must tolerate concurrent calls from many invocations.
pub trait LifecycleSink: Send + Sync {
    fn emit(&self, event: LifecycleEvent);
}

/// Default sink: forwards events to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LifecycleSink for TracingSink {
    fn emit(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Start { label, command } => {
                info!(process = %label, cmd = ?command, "starting process");
            }
            LifecycleEvent::Success { label, exit_code } => {
                info!(process = %label, exit_code, "process completed successfully");
            }
            LifecycleEvent::Failure {
                label,
                exit_code,
                reason,
                tail,
            } => {
                let tail = tail.unwrap_or_default();
                match reason {
                    FailureReason::NonZeroExit(_) | FailureReason::Signal(_) => {
                        warn!(
                            process = %label,
                            exit_code = ?exit_code,
                            reason = %reason,
                            tail = %tail,
                            "process failed"
                        );
                    }
                    FailureReason::Cancelled => {
                        warn!(process = %label, "process cancelled; child terminated");
                    }
                    _ => {
                        error!(
                            process = %label,
                            exit_code = ?exit_code,
                            error = %reason,
                            tail = %tail,
                            "process execution error"
                        );
                    }
                }
            }
        }
    }
}
