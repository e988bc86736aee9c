//! Doctor command implementation
//!
//! Shows the resolved configuration and which provider keys are present.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use tunesmith_llm::ProviderKind;

use super::config_store;
use crate::config::{process_env, resolve, FileConfig, Overrides, ENV_MODEL, ENV_PROVIDER};
use crate::store::ConfigStore;

/// Where a provider's API key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPresence {
    Env,
    File,
    Missing,
}

/// Looks up each provider's key in the environment, then the file.
pub fn key_presence<E>(file: &FileConfig, env: E) -> Vec<(ProviderKind, KeyPresence)>
where
    E: Fn(&str) -> Option<String>,
{
    ProviderKind::ALL
        .into_iter()
        .map(|kind| {
            let presence = if env(kind.api_key_env()).is_some_and(|k| !k.trim().is_empty()) {
                KeyPresence::Env
            } else if file.api_keys.get(kind).is_some() {
                KeyPresence::File
            } else {
                KeyPresence::Missing
            };
            (kind, presence)
        })
        .collect()
}

/// Run the doctor command
///
/// # Returns
/// Exit code: 0 if the configuration resolves, 1 otherwise
pub fn run(config_path: Option<&Path>) -> Result<ExitCode> {
    println!("{}", "Tunesmith Doctor".cyan().bold());
    println!("{}", "================".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!("  {} tunesmith-cli v{}", "->".green(), env!("CARGO_PKG_VERSION"));
    println!(
        "  {} {} registry genres",
        "->".green(),
        tunesmith_registry::GENRES.len()
    );
    println!();

    println!("{}", "Config file:".bold());
    let store = config_store(config_path)?;
    let file = if !store.path().exists() {
        println!(
            "  {} {} (not found, using defaults)",
            "ok".green(),
            store.path().display()
        );
        FileConfig::default()
    } else {
        match store.load() {
            Ok(file) => {
                println!("  {} {}", "ok".green(), store.path().display());
                file
            }
            Err(e) => {
                println!("  {} {}", "!!".red(), e);
                all_ok = false;
                FileConfig::default()
            }
        }
    };
    println!();

    println!("{}", "API keys:".bold());
    for (kind, presence) in key_presence(&file, process_env) {
        match presence {
            KeyPresence::Env => println!("  {} {} (from {})", "ok".green(), kind, kind.api_key_env()),
            KeyPresence::File => println!("  {} {} (from config file)", "ok".green(), kind),
            KeyPresence::Missing => println!("  {} {} not set", "--".dimmed(), kind),
        }
    }
    println!();

    println!("{}", "Resolved:".bold());
    match resolve(&file, process_env, &Overrides::default()) {
        Ok(resolved) => {
            let engine = &resolved.engine;
            match (&engine.provider, resolved.provider_source) {
                (Some(provider), Some(source)) => println!(
                    "  {} provider {} model {} (via {})",
                    "ok".green(),
                    provider.kind,
                    provider.model,
                    source.as_str()
                ),
                _ => {
                    println!("  {} no provider; prompts are generated offline", "!!".yellow());
                    println!(
                        "     {}",
                        format!("Set {} and an API key to enable LLM generation.", ENV_PROVIDER)
                            .dimmed()
                    );
                }
            }
            println!("  {} max chars {}", "->".green(), engine.max_chars);
            println!(
                "  {} fallback on LLM failure {}",
                "->".green(),
                engine.fallback_on_llm_failure
            );
            println!(
                "  {} timeout {}s, {} retries",
                "->".green(),
                engine.call.timeout.as_secs(),
                engine.call.max_retries
            );
            if process_env(ENV_MODEL).is_some() {
                println!("  {} model override from {}", "->".green(), ENV_MODEL);
            }
        }
        Err(e) => {
            println!("  {} {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    if all_ok {
        println!("{}", "All checks passed.".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "Some checks failed.".red().bold());
        Ok(ExitCode::from(1))
    }
}
