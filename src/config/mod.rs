// src/config/mod.rs

//! Job file handling.
//!
//! - [`model`] contains the serde types mirroring the TOML layout.
//! - [`loader`] reads a file from disk.
//! - [`validate`] performs semantic checks and turns raw jobs into [`Job`]s.
//!
//! [`Job`]: crate::types::Job

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, parse_str};
pub use model::{JobConfig, JobFile, RawJobFile};
