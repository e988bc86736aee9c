//! Generation orchestrator.
//!
//! One call runs: validate, fix the seed, assemble deterministically, then
//! either serialize directly (no provider) or ask the model and postprocess
//! its answer. A failed initial call falls back to the deterministic prompt
//! when [`EngineConfig::fallback_on_llm_failure`] is set and is a
//! [`GenerationError`] otherwise. Title and lyrics sub-calls are soft.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tunesmith_engine::{assemble, generate, generate_title, Assembly, SeededRandom};
use tunesmith_registry::genre_ids;
use tunesmith_spec::{
    canonical_request_hash, validate_request, GenerationError, GenerationOutput, GenerationRequest,
    TraceCollector, TraceHeader, TunesmithError, ValidationContext, ValidationWarning,
};

use crate::call::{call_with_retry, soft_call, Delivery};
use crate::config::EngineConfig;
use crate::error::LlmResult;
use crate::postprocess::Postprocessor;
use crate::prompts::{
    clean_title, generation_prompt, generation_system, lyrics_prompt, title_prompt, LYRICS_SYSTEM,
    TITLE_SYSTEM,
};
use crate::provider::{LlmClient, LlmRequest, Provider};

/// Token budget for the lyrics sub-call.
const LYRICS_MAX_TOKENS: u32 = 1500;
const TITLE_MAX_TOKENS: u32 = 32;
const CREATIVE_TEMPERATURE: f32 = 0.9;

/// Trace action recorded for every run.
pub const TRACE_ACTION: &str = "generate";

/// Runs generation calls against an optional LLM client.
///
/// The orchestrator holds no per-call state; one instance can serve
/// concurrent calls, each with its own RNG and trace.
#[derive(Debug)]
pub struct Orchestrator<C = Provider> {
    config: EngineConfig,
    client: Option<C>,
}

impl Orchestrator<Provider> {
    /// Builds the provider client named by `config.provider`, if any.
    pub fn from_config(config: EngineConfig) -> LlmResult<Self> {
        let client = config.provider.as_ref().map(Provider::from_config).transpose()?;
        Ok(Self { config, client })
    }
}

/// Where the text of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Path {
    Deterministic,
    Llm,
    Fallback,
}

impl<C: LlmClient> Orchestrator<C> {
    /// An orchestrator that always calls `client`.
    pub fn with_client(config: EngineConfig, client: C) -> Self {
        Self {
            config,
            client: Some(client),
        }
    }

    /// An orchestrator with no client: every call is deterministic.
    pub fn without_client(config: EngineConfig) -> Self {
        Self { config, client: None }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn client(&self) -> Option<&C> {
        self.client.as_ref()
    }

    /// Generates a prompt with a blocking initial call.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, TunesmithError> {
        self.generate_with(request, &CancellationToken::new(), Delivery::Complete)
            .await
    }

    /// Generates a prompt, streaming the initial call's text to `observer`.
    pub async fn generate_streaming(
        &self,
        request: &GenerationRequest,
        observer: &mut (dyn FnMut(&str) + Send),
    ) -> Result<GenerationOutput, TunesmithError> {
        self.generate_with(request, &CancellationToken::new(), Delivery::Stream(observer))
            .await
    }

    /// Generates a prompt. Cancelling `cancel` abandons outstanding LLM
    /// calls; the run still completes on the deterministic path.
    pub async fn generate_with(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
        delivery: Delivery<'_>,
    ) -> Result<GenerationOutput, TunesmithError> {
        let warnings = self.validate(request)?;
        let seed = request.seed.unwrap_or_else(rand::random);
        let request = request.with_seed(seed);
        let mode = request.prompt_mode();

        let mut rng = SeededRandom::new(seed);
        let mut trace = TraceCollector::new(self.config.trace);
        trace.run_start(&request, self.client.as_ref().map(|c| c.provider_id()));
        for warning in &warnings {
            warn!(code = %warning.code, "{}", warning.message);
            trace.decision("validation", warning.code.code(), "warning", warning.message.clone());
        }
        info!(seed, mode = %mode, llm = self.client.is_some(), "generation started");

        let (text, title, lyrics, path) = match &self.client {
            None => {
                let prompt = generate(&request, &self.config.lean_assembly(), &mut rng, &mut trace);
                (prompt.text, prompt.title, None, Path::Deterministic)
            }
            Some(client) => {
                self.generate_llm(client, &request, cancel, delivery, &mut rng, &mut trace)
                    .await?
            }
        };

        let chars = text.chars().count();
        trace.run_end(chars, path != Path::Deterministic, path == Path::Fallback);
        info!(chars, path = ?path, "generation finished");

        let mut header = TraceHeader::new(TRACE_ACTION, mode, seed);
        if let Ok(hash) = canonical_request_hash(&request) {
            header = header.with_request_hash(hash);
        }
        let debug_info = trace.finish(header, &text);

        Ok(GenerationOutput {
            text,
            title: Some(title),
            lyrics,
            debug_info,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Result<Vec<ValidationWarning>, TunesmithError> {
        let known = genre_ids();
        let ctx = ValidationContext {
            known_genres: &known,
            max_chars: self.config.max_chars,
            provider_configured: self.client.is_some(),
        };
        validate_request(request, &ctx)
            .into_result()
            .map_err(TunesmithError::Validation)
    }

    async fn generate_llm(
        &self,
        client: &C,
        request: &GenerationRequest,
        cancel: &CancellationToken,
        delivery: Delivery<'_>,
        rng: &mut SeededRandom,
        trace: &mut TraceCollector,
    ) -> Result<(String, String, Option<String>, Path), TunesmithError> {
        let config = &self.config;
        let assembly = assemble(request, &config.enriched_assembly(), rng, trace);
        // Drawn before any network call so the RNG sequence matches the
        // deterministic path.
        let fallback_title = generate_title(&assembly.header_mood, rng);

        let llm_request = LlmRequest::new(
            client.model(),
            generation_system(request.prompt_mode(), config.max_chars),
            generation_prompt(request, &assembly),
        );
        let outcome = call_with_retry(client, &llm_request, &config.call, cancel, delivery).await;
        trace.llm_call(outcome.to_event(client.provider_id(), "generate", &llm_request));

        let raw = match outcome.result {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, fallback = config.fallback_on_llm_failure, "generation call failed");
                trace.error(e.kind(), e.to_string(), e.status());
                if !config.fallback_on_llm_failure {
                    return Err(GenerationError::from_stage(e).into());
                }
                trace.decision("llm", "generate", "fallback", "initial call failed");
                let text = assembly.render(request, config.tag_budget_lean, config.max_chars);
                return Ok((text, fallback_title, None, Path::Fallback));
            }
        };

        let postprocessor = Postprocessor {
            client,
            call: &config.call,
            cancel,
            mode: request.prompt_mode(),
            max_chars: config.max_chars,
            locked_phrase: request.locked_phrase(),
        };
        let text = postprocessor.run(raw, trace).await;

        let title = self
            .llm_title(client, request, &assembly, cancel, trace)
            .await
            .unwrap_or(fallback_title);
        let lyrics = if request.lyrics_mode {
            self.llm_lyrics(client, request, &assembly, cancel, trace).await
        } else {
            None
        };
        Ok((text, title, lyrics, Path::Llm))
    }

    async fn llm_title(
        &self,
        client: &C,
        request: &GenerationRequest,
        assembly: &Assembly,
        cancel: &CancellationToken,
        trace: &mut TraceCollector,
    ) -> Option<String> {
        let mut llm_request = LlmRequest::new(
            client.model(),
            TITLE_SYSTEM,
            title_prompt(&request.description, &assembly.display_genre, &assembly.header_mood),
        )
        .with_temperature(CREATIVE_TEMPERATURE);
        llm_request.max_tokens = TITLE_MAX_TOKENS;
        let raw = soft_call(client, &llm_request, &self.config.call, cancel, "title", trace).await?;
        let title = clean_title(&raw);
        if title.is_none() {
            trace.decision("title", "llm", "rejected", "model title was empty or too long");
        }
        title
    }

    async fn llm_lyrics(
        &self,
        client: &C,
        request: &GenerationRequest,
        assembly: &Assembly,
        cancel: &CancellationToken,
        trace: &mut TraceCollector,
    ) -> Option<String> {
        let mut llm_request = LlmRequest::new(
            client.model(),
            LYRICS_SYSTEM,
            lyrics_prompt(
                &request.description,
                &assembly.display_genre,
                &assembly.header_mood,
                request.locked_phrase(),
            ),
        )
        .with_temperature(CREATIVE_TEMPERATURE);
        llm_request.max_tokens = LYRICS_MAX_TOKENS;
        soft_call(client, &llm_request, &self.config.call, cancel, "lyrics", trace).await
    }
}
