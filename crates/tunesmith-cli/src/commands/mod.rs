//! CLI command implementations

pub mod config;
pub mod doctor;
pub mod generate;
pub mod genres;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::default_config_path;
use crate::store::TomlConfigStore;

/// The store at `--config PATH`, or at the default location.
pub(crate) fn config_store(config_path: Option<&Path>) -> Result<TomlConfigStore> {
    let path: PathBuf = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().context("no --config given")?,
    };
    Ok(TomlConfigStore::new(path))
}
