// src/config/model.rs

use serde::Deserialize;

use crate::types::{ExecutionOptions, Job};

/// Job file as read from TOML, before validation.
///
/// ```toml
/// [[job]]
/// name = "ingest"
/// cmd = ["echo", "raw_data"]
/// capture_output = true
///
/// [[job]]
/// name = "clean"
/// cmd = ["python3", "-c", "print('cleaned')"]
/// env = { PATH = "/usr/bin:/bin" }
/// ```
///
/// Jobs keep file order, which is the order used by pipelines and batches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJobFile {
    #[serde(default, rename = "job")]
    pub jobs: Vec<JobConfig>,
}

/// One `[[job]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Job name; used as the process label unless `process_name` is set.
    pub name: String,

    /// Executable followed by its arguments.
    pub cmd: Vec<String>,

    /// `start_new_session`, `capture_output`, `process_name`,
    /// `working_directory` (alias `cwd`), `environment` (alias `env`).
    #[serde(flatten)]
    pub options: ExecutionOptions,
}

impl JobConfig {
    pub fn to_job(&self) -> Job {
        let mut options = self.options.clone();
        if options.process_name.is_none() {
            options.process_name = Some(self.name.clone());
        }
        Job::new(self.cmd.iter().cloned(), options)
    }
}

/// A validated job file.
///
/// Only constructible through `TryFrom<RawJobFile>`, so holding one means
/// every job has a unique name and a non-empty command.
#[derive(Debug, Clone)]
pub struct JobFile {
    jobs: Vec<JobConfig>,
}

impl JobFile {
    pub(crate) fn new_unchecked(jobs: Vec<JobConfig>) -> Self {
        Self { jobs }
    }

    /// Runnable jobs in file order.
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.iter().map(JobConfig::to_job).collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
