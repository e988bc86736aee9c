//! Immutable per-call configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tunesmith_engine::{AssemblyOptions, ENRICHED_TAG_BUDGET, LEAN_TAG_BUDGET};
use tunesmith_spec::{TraceOptions, MAX_CHARS};

use crate::error::LlmError;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Groq,
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    /// All providers, in display order.
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Groq, ProviderKind::OpenAi, ProviderKind::Anthropic];

    /// Parses a provider id string (case-insensitive).
    pub fn from_id(id: &str) -> Result<Self, LlmError> {
        match id.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "openai" | "open-ai" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            other => Err(LlmError::UnknownProvider(other.to_string())),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "llama-3.3-70b-versatile",
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Anthropic => "https://api.anthropic.com/v1",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which provider to call and how to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: String,
    /// Overrides the provider's default endpoint.
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Creates a config using the provider's default model.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            model: kind.default_model().to_string(),
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The endpoint base, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
            .trim_end_matches('/')
    }
}

// The API key never reaches logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Retry, timeout and backoff for one LLM call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Attempts after the first.
    pub max_retries: u32,
    /// Per-attempt timeout.
    pub timeout: Duration,
    pub backoff_initial: Duration,
    pub backoff_max: Duration,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            max_retries: 2,
            timeout: Duration::from_secs(30),
            backoff_initial: Duration::from_millis(500),
            backoff_max: Duration::from_secs(5),
        }
    }
}

impl CallOptions {
    /// Backoff before retry number `retry` (1-based): initial doubled per
    /// retry, capped at `backoff_max`.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.backoff_initial
            .checked_mul(factor)
            .unwrap_or(self.backoff_max)
            .min(self.backoff_max)
    }
}

/// Configuration for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// `None` means the deterministic path only.
    pub provider: Option<ProviderConfig>,
    pub max_chars: usize,
    pub tag_budget_lean: usize,
    pub tag_budget_enriched: usize,
    pub max_instruments: usize,
    /// Return the deterministic prompt instead of an error when the initial
    /// LLM call fails.
    pub fallback_on_llm_failure: bool,
    pub call: CallOptions,
    pub trace: TraceOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: None,
            max_chars: MAX_CHARS,
            tag_budget_lean: LEAN_TAG_BUDGET,
            tag_budget_enriched: ENRICHED_TAG_BUDGET,
            max_instruments: 6,
            fallback_on_llm_failure: true,
            call: CallOptions::default(),
            trace: TraceOptions::default(),
        }
    }
}

impl EngineConfig {
    /// A config with no provider.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_call_options(mut self, call: CallOptions) -> Self {
        self.call = call;
        self
    }

    pub fn with_trace(mut self, trace: TraceOptions) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_on_llm_failure = enabled;
        self
    }

    /// Assembly limits for the deterministic path.
    pub fn lean_assembly(&self) -> AssemblyOptions {
        AssemblyOptions {
            max_chars: self.max_chars,
            tag_budget: self.tag_budget_lean,
            max_instruments: self.max_instruments,
        }
    }

    /// Assembly limits when the assembly feeds an LLM.
    pub fn enriched_assembly(&self) -> AssemblyOptions {
        AssemblyOptions {
            tag_budget: self.tag_budget_enriched,
            ..self.lean_assembly()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_ids() {
        assert_eq!(ProviderKind::from_id("Groq").unwrap(), ProviderKind::Groq);
        assert_eq!(ProviderKind::from_id(" openai ").unwrap(), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::from_id("anthropic").unwrap(), ProviderKind::Anthropic);
        assert!(matches!(
            ProviderKind::from_id("mistral"),
            Err(LlmError::UnknownProvider(id)) if id == "mistral"
        ));
        for kind in ProviderKind::ALL {
            assert_eq!(ProviderKind::from_id(kind.id()).unwrap(), kind);
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let options = CallOptions::default();
        assert_eq!(options.backoff_for(1), Duration::from_millis(500));
        assert_eq!(options.backoff_for(2), Duration::from_millis(1000));
        assert_eq!(options.backoff_for(4), Duration::from_millis(4000));
        assert_eq!(options.backoff_for(5), Duration::from_secs(5));
        assert_eq!(options.backoff_for(40), Duration::from_secs(5));
    }

    #[test]
    fn test_api_key_is_redacted() {
        let config = ProviderConfig::new(ProviderKind::Groq, "sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert_eq!(config.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig::new(ProviderKind::OpenAi, "k").with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url(), "http://localhost:8080/v1");
        let default = ProviderConfig::new(ProviderKind::Anthropic, "k");
        assert_eq!(default.base_url(), "https://api.anthropic.com/v1");
    }

    #[test]
    fn test_assembly_budgets() {
        let config = EngineConfig::default();
        assert_eq!(config.lean_assembly().tag_budget, 6);
        assert_eq!(config.enriched_assembly().tag_budget, 15);
        assert!(config.fallback_on_llm_failure);
    }
}
