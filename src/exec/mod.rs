// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running commands, using
//! `tokio::process::Command`, and reporting each invocation's lifecycle to a
//! [`LifecycleSink`].
//!
//! - [`runner`] owns [`ProcessRunner`], the single execution primitive.
//! - [`capture`] drains and decodes captured stdout/stderr pipes.
//! - [`session`] detaches children into a new session on request.
//! - [`events`] defines the lifecycle events, the sink trait and the default
//!   `tracing`-backed sink. Tests can provide their own sink.

pub mod capture;
pub mod events;
pub mod runner;
pub mod session;

pub use capture::{tail_lines, FAILURE_TAIL_LINES};
pub use events::{LifecycleEvent, LifecycleSink, TracingSink};
pub use runner::{resolve_label, ProcessRunner};
