#![allow(dead_code)]

use async_runner::{ExecutionOptions, Job};

/// `sh -c <script>` as an argument vector.
pub fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

/// A named job running `sh -c <script>`.
pub fn sh_job(name: &str, script: &str) -> Job {
    Job::new(sh(script), ExecutionOptions::new().process_name(name))
}

/// A named job running `sh -c <script>` with captured output.
pub fn captured_sh_job(name: &str, script: &str) -> Job {
    Job::new(
        sh(script),
        ExecutionOptions::new().process_name(name).capture_output(true),
    )
}
