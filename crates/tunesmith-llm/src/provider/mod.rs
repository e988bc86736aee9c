//! LLM provider clients.
//!
//! Providers are selected by [`ProviderKind`] and dispatched through the
//! [`Provider`] enum. Groq and OpenAI share the chat-completions wire format;
//! Anthropic uses the messages API.

mod anthropic;
mod openai;
mod scripted;

use std::future::Future;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tunesmith_spec::trace::LlmRequestRecord;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::{LlmError, LlmResult};
use crate::stream::{ChunkSender, ChunkStream, SseDecoder};

pub use anthropic::AnthropicClient;
pub use openai::OpenAiCompatibleClient;
pub use scripted::{ScriptedClient, ScriptedReply};

/// Default completion budget, in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// One completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.8,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// The trace record of this request.
    pub fn record(&self) -> LlmRequestRecord {
        LlmRequestRecord {
            model: self.model.clone(),
            system: self.system.clone(),
            prompt: self.prompt.clone(),
        }
    }
}

/// A completed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub text: String,
    /// HTTP status, when the transport has one.
    pub status: Option<u16>,
}

impl LlmResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: None,
        }
    }
}

/// A text-completion backend.
pub trait LlmClient: Send + Sync {
    /// Provider id recorded in traces.
    fn provider_id(&self) -> &str;

    /// Model used when a request does not name one.
    fn model(&self) -> &str;

    /// Performs one completion, without retries.
    fn complete(&self, request: &LlmRequest) -> impl Future<Output = LlmResult<LlmResponse>> + Send;

    /// Streams one completion. The default completes fully and yields the
    /// text as a single chunk.
    fn stream(
        &self,
        request: &LlmRequest,
        cancel: CancellationToken,
    ) -> impl Future<Output = LlmResult<ChunkStream>> + Send {
        async move {
            let response = self.complete(request).await?;
            Ok(ChunkStream::from_text(response.text, cancel))
        }
    }
}

/// A configured provider client.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Groq or OpenAI chat completions.
    OpenAiCompatible(OpenAiCompatibleClient),
    /// Anthropic messages API.
    Anthropic(AnthropicClient),
}

impl Provider {
    /// Builds the client for a provider config.
    pub fn from_config(config: &ProviderConfig) -> LlmResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey(config.kind.id()));
        }
        let http = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(match config.kind {
            ProviderKind::Groq | ProviderKind::OpenAi => {
                Provider::OpenAiCompatible(OpenAiCompatibleClient::new(http, config))
            }
            ProviderKind::Anthropic => Provider::Anthropic(AnthropicClient::new(http, config)),
        })
    }
}

impl LlmClient for Provider {
    fn provider_id(&self) -> &str {
        match self {
            Provider::OpenAiCompatible(c) => c.provider_id(),
            Provider::Anthropic(c) => c.provider_id(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Provider::OpenAiCompatible(c) => c.model(),
            Provider::Anthropic(c) => c.model(),
        }
    }

    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        match self {
            Provider::OpenAiCompatible(c) => c.complete(request).await,
            Provider::Anthropic(c) => c.complete(request).await,
        }
    }

    async fn stream(&self, request: &LlmRequest, cancel: CancellationToken) -> LlmResult<ChunkStream> {
        match self {
            Provider::OpenAiCompatible(c) => c.stream(request, cancel).await,
            Provider::Anthropic(c) => c.stream(request, cancel).await,
        }
    }
}

/// One decoded server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StreamEvent {
    Delta(String),
    Skip,
    Done,
}

/// Reads an event-stream body, forwarding text deltas until the provider's
/// end marker, the end of the body, an error, or cancellation.
pub(crate) async fn pump_sse(
    response: reqwest::Response,
    tx: ChunkSender,
    parse: fn(&str) -> LlmResult<StreamEvent>,
) {
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();
    loop {
        let next = tokio::select! {
            _ = tx.cancellation().cancelled() => return,
            next = body.next() => next,
        };
        let (events, ended) = match next {
            Some(Ok(bytes)) => (decoder.push(&bytes), false),
            Some(Err(e)) => {
                tx.send(Err(LlmError::Http(e))).await;
                return;
            }
            None => (decoder.finish().into_iter().collect::<Vec<_>>(), true),
        };
        for data in events {
            match parse(&data) {
                Ok(StreamEvent::Delta(delta)) if !delta.is_empty() => {
                    if !tx.send(Ok(delta)).await {
                        return;
                    }
                }
                Ok(StreamEvent::Done) => return,
                Ok(_) => {}
                Err(e) => {
                    tx.send(Err(e)).await;
                    return;
                }
            }
        }
        if ended {
            return;
        }
    }
}

/// Reads a non-success response into a status error.
pub(crate) async fn status_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    LlmError::bad_status(status, body)
}
