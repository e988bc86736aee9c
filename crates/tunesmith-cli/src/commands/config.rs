//! Config command implementation
//!
//! Shows or updates the persisted settings file.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use tunesmith_llm::ProviderKind;

use super::config_store;
use crate::config::{ApiKeys, FileConfig};
use crate::store::ConfigStore;

const REDACTED: &str = "<set>";

/// Keys accepted by `tunesmith config set`.
pub const SETTABLE_KEYS: &[&str] = &[
    "provider",
    "model",
    "base-url",
    "max-chars",
    "fallback",
    "timeout-secs",
    "max-retries",
    "api-key.groq",
    "api-key.openai",
    "api-key.anthropic",
];

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print the config file path and contents (keys redacted)
    Show,
    /// Set one value in the config file
    Set {
        /// Setting name, e.g. provider, model, max-chars, api-key.groq
        key: String,
        value: String,
    },
}

/// Parses one `key value` pair into a partial config.
pub fn parse_setting(key: &str, value: &str) -> Result<FileConfig> {
    let mut partial = FileConfig::default();
    match key {
        "provider" => {
            let kind = ProviderKind::from_id(value)?;
            partial.provider = Some(kind.id().to_string());
        }
        "model" => partial.model = Some(value.to_string()),
        "base-url" => partial.base_url = Some(value.to_string()),
        "max-chars" => {
            let max_chars: usize = value.parse().context("max-chars must be a positive integer")?;
            if max_chars == 0 {
                bail!("max-chars must be a positive integer");
            }
            partial.max_chars = Some(max_chars);
        }
        "fallback" => {
            partial.fallback = Some(value.parse().context("fallback must be true or false")?)
        }
        "timeout-secs" => {
            partial.timeout_secs = Some(value.parse().context("timeout-secs must be an integer")?)
        }
        "max-retries" => {
            partial.max_retries = Some(value.parse().context("max-retries must be an integer")?)
        }
        _ => {
            let Some(provider) = key.strip_prefix("api-key.") else {
                bail!(
                    "unknown setting '{}'; expected one of: {}",
                    key,
                    SETTABLE_KEYS.join(", ")
                );
            };
            let key = Some(value.to_string());
            partial.api_keys = match ProviderKind::from_id(provider)? {
                ProviderKind::Groq => ApiKeys { groq: key, ..ApiKeys::default() },
                ProviderKind::OpenAi => ApiKeys { openai: key, ..ApiKeys::default() },
                ProviderKind::Anthropic => ApiKeys { anthropic: key, ..ApiKeys::default() },
            };
        }
    }
    Ok(partial)
}

/// A copy of `config` with every API key replaced by a marker.
pub fn redacted(config: &FileConfig) -> FileConfig {
    let mask = |key: &Option<String>| key.as_ref().map(|_| REDACTED.to_string());
    FileConfig {
        api_keys: ApiKeys {
            groq: mask(&config.api_keys.groq),
            openai: mask(&config.api_keys.openai),
            anthropic: mask(&config.api_keys.anthropic),
        },
        ..config.clone()
    }
}

/// Run the config command
pub fn run(action: &ConfigAction, config_path: Option<&Path>) -> Result<ExitCode> {
    let store = config_store(config_path)?;
    match action {
        ConfigAction::Show => {
            println!("{} {}", "Config file:".bold(), store.path().display());
            let config = store.load()?;
            let text = toml::to_string_pretty(&redacted(&config)).context("failed to render config")?;
            if text.trim().is_empty() {
                println!("{}", "(empty, using defaults)".dimmed());
            } else {
                print!("{}", text);
            }
        }
        ConfigAction::Set { key, value } => {
            let partial = parse_setting(key, value)?;
            store.save(partial)?;
            println!("{} {} in {}", "ok".green(), key, store.path().display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
