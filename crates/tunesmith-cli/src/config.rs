//! Configuration file, environment, and flag resolution.
//!
//! Precedence, highest first: command-line flag, environment variable,
//! config file, compiled default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tunesmith_llm::{CallOptions, EngineConfig, LlmError, ProviderConfig, ProviderKind};
use tunesmith_spec::{StageError, TraceOptions};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const APP_DIR_NAME: &str = "tunesmith";

pub const ENV_PROVIDER: &str = "TUNESMITH_PROVIDER";
pub const ENV_MODEL: &str = "TUNESMITH_MODEL";

/// Errors raised while loading, saving, or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("provider '{provider}' has no API key: set {env} or add it to the config file")]
    MissingApiKey { provider: ProviderKind, env: &'static str },

    #[error("unable to determine the user config directory")]
    NoConfigDir,
}

impl StageError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "CFG_001",
            ConfigError::Parse { .. } => "CFG_002",
            ConfigError::Write { .. } => "CFG_003",
            ConfigError::Serialize(_) => "CFG_004",
            ConfigError::Provider(_) => "CFG_005",
            ConfigError::MissingApiKey { .. } => "CFG_006",
            ConfigError::NoConfigDir => "CFG_007",
        }
    }

    fn category(&self) -> &'static str {
        "config"
    }
}

/// API keys stored in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
}

impl ApiKeys {
    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        let key = match kind {
            ProviderKind::Groq => &self.groq,
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
        };
        key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn merge(&mut self, other: ApiKeys) {
        if other.groq.is_some() {
            self.groq = other.groq;
        }
        if other.openai.is_some() {
            self.openai = other.openai;
        }
        if other.anthropic.is_some() {
            self.anthropic = other.anthropic;
        }
    }
}

/// Contents of `config.toml`. Every field is optional; a partial file
/// overrides only what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceOptions>,
    #[serde(skip_serializing_if = "is_empty_keys")]
    pub api_keys: ApiKeys,
}

fn is_empty_keys(keys: &ApiKeys) -> bool {
    keys == &ApiKeys::default()
}

impl FileConfig {
    /// Reads a config file. A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlays every field `partial` sets.
    pub fn apply_partial(&mut self, partial: FileConfig) {
        if partial.provider.is_some() {
            self.provider = partial.provider;
        }
        if partial.model.is_some() {
            self.model = partial.model;
        }
        if partial.base_url.is_some() {
            self.base_url = partial.base_url;
        }
        if partial.max_chars.is_some() {
            self.max_chars = partial.max_chars;
        }
        if partial.fallback.is_some() {
            self.fallback = partial.fallback;
        }
        if partial.timeout_secs.is_some() {
            self.timeout_secs = partial.timeout_secs;
        }
        if partial.max_retries.is_some() {
            self.max_retries = partial.max_retries;
        }
        if partial.trace.is_some() {
            self.trace = partial.trace;
        }
        self.api_keys.merge(partial.api_keys);
    }
}

/// `$XDG_CONFIG_HOME/tunesmith/config.toml` or the platform equivalent.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Flag values that override everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Ignore any configured provider.
    pub offline: bool,
}

/// Where the provider choice came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSource {
    Flag,
    Env,
    File,
    /// No provider named; the first provider with a key was used.
    KeyDetected,
}

impl ProviderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSource::Flag => "flag",
            ProviderSource::Env => "environment",
            ProviderSource::File => "config file",
            ProviderSource::KeyDetected => "detected API key",
        }
    }
}

/// The resolved engine config plus provenance for `doctor`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub engine: EngineConfig,
    pub provider_source: Option<ProviderSource>,
}

/// Resolves the engine config from a file config, an environment lookup,
/// and flag overrides.
///
/// A provider named by flag, environment, or file must have an API key. With
/// no provider named, the first provider whose key is available is used;
/// with none available the config is offline.
pub fn resolve<E>(file: &FileConfig, env: E, overrides: &Overrides) -> Result<ResolvedConfig, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    let mut engine = EngineConfig::default();
    if let Some(max_chars) = file.max_chars {
        engine.max_chars = max_chars;
    }
    if let Some(fallback) = file.fallback {
        engine.fallback_on_llm_failure = fallback;
    }
    if let Some(trace) = file.trace {
        engine.trace = trace;
    }
    engine.call = CallOptions {
        max_retries: file.max_retries.unwrap_or(engine.call.max_retries),
        timeout: file
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(engine.call.timeout),
        ..engine.call
    };

    if overrides.offline {
        return Ok(ResolvedConfig {
            engine,
            provider_source: None,
        });
    }

    let named = overrides
        .provider
        .clone()
        .map(|p| (p, ProviderSource::Flag))
        .or_else(|| env(ENV_PROVIDER).map(|p| (p, ProviderSource::Env)))
        .or_else(|| file.provider.clone().map(|p| (p, ProviderSource::File)));

    let key_for = |kind: ProviderKind| {
        env(kind.api_key_env()).or_else(|| file.api_keys.get(kind).map(str::to_string))
    };

    let (kind, key, source) = match named {
        Some((id, source)) => {
            let kind = ProviderKind::from_id(&id)?;
            let key = key_for(kind).ok_or(ConfigError::MissingApiKey {
                provider: kind,
                env: kind.api_key_env(),
            })?;
            (kind, key, source)
        }
        None => {
            let detected = ProviderKind::ALL
                .into_iter()
                .find_map(|kind| key_for(kind).map(|key| (kind, key)));
            match detected {
                Some((kind, key)) => (kind, key, ProviderSource::KeyDetected),
                None => {
                    return Ok(ResolvedConfig {
                        engine,
                        provider_source: None,
                    })
                }
            }
        }
    };

    let mut provider = ProviderConfig::new(kind, key);
    if let Some(model) = overrides
        .model
        .clone()
        .or_else(|| env(ENV_MODEL))
        .or_else(|| file.model.clone())
    {
        provider = provider.with_model(model);
    }
    if let Some(base_url) = &file.base_url {
        provider = provider.with_base_url(base_url.clone());
    }

    Ok(ResolvedConfig {
        engine: engine.with_provider(provider),
        provider_source: Some(source),
    })
}

/// Environment lookup backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_everything_is_offline() {
        let resolved = resolve(&FileConfig::default(), env_of(&[]), &Overrides::default()).unwrap();
        assert!(resolved.engine.provider.is_none());
        assert_eq!(resolved.engine.max_chars, 1000);
        assert_eq!(resolved.provider_source, None);
    }

    #[test]
    fn test_key_detection_picks_first_available() {
        let resolved = resolve(
            &FileConfig::default(),
            env_of(&[("ANTHROPIC_API_KEY", "a"), ("OPENAI_API_KEY", "o")]),
            &Overrides::default(),
        )
        .unwrap();
        let provider = resolved.engine.provider.unwrap();
        assert_eq!(provider.kind, ProviderKind::OpenAi);
        assert_eq!(provider.api_key, "o");
        assert_eq!(resolved.provider_source, Some(ProviderSource::KeyDetected));
    }

    #[test]
    fn test_flag_beats_env_beats_file() {
        let file = FileConfig {
            provider: Some("anthropic".into()),
            model: Some("file-model".into()),
            api_keys: ApiKeys {
                anthropic: Some("fa".into()),
                groq: Some("fg".into()),
                ..ApiKeys::default()
            },
            ..FileConfig::default()
        };
        let env = env_of(&[(ENV_PROVIDER, "openai"), ("OPENAI_API_KEY", "eo"), (ENV_MODEL, "env-model")]);

        let from_env = resolve(&file, &env, &Overrides::default()).unwrap();
        let provider = from_env.engine.provider.unwrap();
        assert_eq!(provider.kind, ProviderKind::OpenAi);
        assert_eq!(provider.model, "env-model");
        assert_eq!(from_env.provider_source, Some(ProviderSource::Env));

        let overrides = Overrides {
            provider: Some("groq".into()),
            model: Some("flag-model".into()),
            offline: false,
        };
        let from_flag = resolve(&file, &env, &overrides).unwrap();
        let provider = from_flag.engine.provider.unwrap();
        assert_eq!(provider.kind, ProviderKind::Groq);
        assert_eq!(provider.api_key, "fg");
        assert_eq!(provider.model, "flag-model");
    }

    #[test]
    fn test_named_provider_without_key_fails() {
        let overrides = Overrides {
            provider: Some("groq".into()),
            ..Overrides::default()
        };
        let err = resolve(&FileConfig::default(), env_of(&[]), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { env: "GROQ_API_KEY", .. }));
        assert_eq!(err.code(), "CFG_006");
    }

    #[test]
    fn test_unknown_provider_fails() {
        let overrides = Overrides {
            provider: Some("mistral".into()),
            ..Overrides::default()
        };
        let err = resolve(&FileConfig::default(), env_of(&[]), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Provider(LlmError::UnknownProvider(_))));
    }

    #[test]
    fn test_offline_ignores_keys() {
        let overrides = Overrides {
            offline: true,
            ..Overrides::default()
        };
        let resolved = resolve(&FileConfig::default(), env_of(&[("GROQ_API_KEY", "g")]), &overrides).unwrap();
        assert!(resolved.engine.provider.is_none());
    }

    #[test]
    fn test_file_tunables() {
        let file: FileConfig = toml::from_str(
            r#"
            max_chars = 800
            fallback = false
            timeout_secs = 10
            max_retries = 4

            [trace]
            enabled = false
            "#,
        )
        .unwrap();
        let engine = resolve(&file, env_of(&[]), &Overrides::default()).unwrap().engine;
        assert_eq!(engine.max_chars, 800);
        assert!(!engine.fallback_on_llm_failure);
        assert_eq!(engine.call.timeout, Duration::from_secs(10));
        assert_eq!(engine.call.max_retries, 4);
        assert!(!engine.trace.enabled);
        assert_eq!(engine.trace.max_bytes, 64 * 1024);
    }

    #[test]
    fn test_read_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert_eq!(FileConfig::read(&missing).unwrap(), FileConfig::default());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "provider = [").unwrap();
        assert!(matches!(FileConfig::read(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_apply_partial_overrides_named_fields() {
        let mut base = FileConfig {
            provider: Some("groq".into()),
            model: Some("m1".into()),
            ..FileConfig::default()
        };
        base.apply_partial(FileConfig {
            model: Some("m2".into()),
            api_keys: ApiKeys {
                openai: Some("k".into()),
                ..ApiKeys::default()
            },
            ..FileConfig::default()
        });
        assert_eq!(base.provider.as_deref(), Some("groq"));
        assert_eq!(base.model.as_deref(), Some("m2"));
        assert_eq!(base.api_keys.get(ProviderKind::OpenAi), Some("k"));
    }
}
