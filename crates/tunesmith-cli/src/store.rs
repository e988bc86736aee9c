//! Persistent settings storage.
//!
//! The generation core never reads storage; only the CLI loads settings
//! through a [`ConfigStore`] and folds them into an `EngineConfig`.

use std::path::{Path, PathBuf};

use crate::config::{ConfigError, FileConfig};

/// Loads and saves the user's persisted settings.
pub trait ConfigStore {
    /// Loads the stored settings. Missing storage is an empty config.
    fn load(&self) -> Result<FileConfig, ConfigError>;

    /// Overlays `partial` onto the stored settings and persists the result.
    fn save(&self, partial: FileConfig) -> Result<FileConfig, ConfigError>;
}

/// A [`ConfigStore`] backed by a TOML file.
#[derive(Debug, Clone)]
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<FileConfig, ConfigError> {
        FileConfig::read(&self.path)
    }

    fn save(&self, partial: FileConfig) -> Result<FileConfig, ConfigError> {
        let mut merged = self.load()?;
        merged.apply_partial(partial);

        let contents = toml::to_string_pretty(&merged)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, contents).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(merged)
    }
}
