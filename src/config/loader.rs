// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{JobFile, RawJobFile};
use crate::errors::Result;

/// Load a job file from a given path and return the raw `RawJobFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawJobFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let raw: RawJobFile = toml::from_str(&contents)?;
    Ok(raw)
}

/// Parse and validate a job file held in memory.
pub fn parse_str(contents: &str) -> Result<JobFile> {
    let raw: RawJobFile = toml::from_str(contents)?;
    JobFile::try_from(raw)
}

/// Load a job file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults for every execution option.
/// - Checks for an empty job list, empty or duplicate names and empty
///   commands.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<JobFile> {
    let raw = load_from_path(&path)?;
    JobFile::try_from(raw)
}

/// `Runner.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Runner.toml")
}
