// src/exec/capture.rs

//! Draining and decoding of captured stdout/stderr pipes.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Number of trailing output lines attached to failure events.
pub const FAILURE_TAIL_LINES: usize = 20;

/// Bytes read from one pipe, plus the error that stopped the read, if any.
///
/// On error the bytes read so far are kept.
#[derive(Debug, Default)]
pub(crate) struct Captured {
    pub bytes: Vec<u8>,
    pub error: Option<io::Error>,
}

impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Read a pipe to EOF.
///
/// Must be polled concurrently with `Child::wait`; otherwise a child that
/// fills the pipe buffer blocks forever.
pub(crate) async fn drain<R>(pipe: Option<R>) -> Captured
where
    R: AsyncRead + Unpin,
{
    let mut captured = Captured::default();
    if let Some(mut pipe) = pipe {
        captured.error = pipe.read_to_end(&mut captured.bytes).await.err();
    }
    captured
}

/// Last `n` lines of `text`.
pub fn tail_lines(text: &str, n: usize) -> String {
    let trimmed = text.trim_end_matches(['\n', '\r']);
    let lines: Vec<&str> = trimmed.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

/// Diagnostic tail for a failure event: stderr, or stdout when stderr is
/// empty. `None` when nothing was captured.
pub(crate) fn failure_tail(stdout: Option<&str>, stderr: Option<&str>) -> Option<String> {
    [stderr, stdout]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .map(|s| tail_lines(s, FAILURE_TAIL_LINES))
}
