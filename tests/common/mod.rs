#![allow(dead_code, unused_imports)]

use std::path::Path;
use std::time::Duration;

pub use async_runner_test_utils::builders::{captured_sh_job, sh, sh_job};
pub use async_runner_test_utils::{init_tracing, with_timeout, RecordingSink};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wait until a child has written its pid to `path` (written via a rename,
/// so a present file is complete).
pub async fn wait_for_pid_file(path: &Path) -> i32 {
    loop {
        if let Ok(contents) = std::fs::read_to_string(path) {
            if let Ok(pid) = contents.trim().parse() {
                return pid;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Shell snippet that records the shell's pid in `path` atomically.
pub fn write_pid_snippet(path: &Path) -> String {
    let path = path.display();
    format!("echo $$ > '{path}.tmp' && mv '{path}.tmp' '{path}'")
}

/// True once `pid` no longer runs: either gone or left as a zombie waiting
/// to be reaped.
#[cfg(target_os = "linux")]
pub fn process_gone(pid: i32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Err(_) => true,
        // Format: "pid (comm) state ..."; comm may contain spaces.
        Ok(stat) => stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.split_whitespace().next())
            .is_some_and(|state| state == "Z" || state == "X"),
    }
}

#[cfg(target_os = "linux")]
pub async fn wait_until_gone(pid: i32, limit: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if process_gone(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    process_gone(pid)
}
