//! Tunesmith CLI library
//!
//! Command implementations, config resolution and logging setup behind the
//! `tunesmith` binary.

pub mod commands;
pub mod config;
pub mod logging;
pub mod store;

pub use config::{resolve, ConfigError, FileConfig, Overrides, ResolvedConfig};
pub use store::{ConfigStore, TomlConfigStore};
