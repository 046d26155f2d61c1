// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{JobFile, RawJobFile};
use crate::errors::{Result, RunnerError};

impl TryFrom<RawJobFile> for JobFile {
    type Error = RunnerError;

    fn try_from(raw: RawJobFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_jobs(&raw)?;
        Ok(JobFile::new_unchecked(raw.jobs))
    }
}

fn validate_raw_jobs(raw: &RawJobFile) -> Result<()> {
    ensure_has_jobs(raw)?;
    validate_names(raw)?;
    validate_commands(raw)?;
    Ok(())
}

fn ensure_has_jobs(raw: &RawJobFile) -> Result<()> {
    if raw.jobs.is_empty() {
        return Err(RunnerError::ConfigError(
            "job file must contain at least one [[job]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_names(raw: &RawJobFile) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, job) in raw.jobs.iter().enumerate() {
        if job.name.trim().is_empty() {
            return Err(RunnerError::ConfigError(format!(
                "job #{} has an empty name",
                idx + 1
            )));
        }
        if !seen.insert(job.name.as_str()) {
            return Err(RunnerError::ConfigError(format!(
                "duplicate job name '{}'",
                job.name
            )));
        }
    }
    Ok(())
}

fn validate_commands(raw: &RawJobFile) -> Result<()> {
    for job in raw.jobs.iter() {
        match job.cmd.first() {
            None => {
                return Err(RunnerError::ConfigError(format!(
                    "job '{}' has an empty cmd",
                    job.name
                )));
            }
            Some(program) if program.is_empty() => {
                return Err(RunnerError::ConfigError(format!(
                    "job '{}' has an empty executable name",
                    job.name
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}
