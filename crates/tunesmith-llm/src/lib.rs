//! Tunesmith LLM Layer
//!
//! Provider clients, bounded calls, streaming, output postprocessing, and the
//! [`Orchestrator`] that ties them to the deterministic engine.
//!
//! # Overview
//!
//! Without a provider the orchestrator returns the engine's deterministic
//! prompt. With one, the engine's assembly becomes context for a single
//! generation call whose answer is scrubbed, repaired, deduplicated, and
//! fitted to the character budget. Only the initial call can fail a run, and
//! only when fallback is disabled.
//!
//! # Example
//!
//! ```
//! use tunesmith_llm::{EngineConfig, Orchestrator, ScriptedClient};
//! use tunesmith_spec::GenerationRequest;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let orchestrator = Orchestrator::<ScriptedClient>::without_client(EngineConfig::offline());
//! let request = GenerationRequest::builder("smooth jazz night session").seed(42).build();
//! let output = orchestrator.generate(&request).await.unwrap();
//! assert!(output.text.contains("Genre: Jazz"));
//! # });
//! ```

pub mod call;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod postprocess;
pub mod prompts;
pub mod provider;
pub mod stream;

pub use call::{call_with_retry, soft_call, CallOutcome, Delivery};
pub use config::{CallOptions, EngineConfig, ProviderConfig, ProviderKind};
pub use error::{LlmError, LlmResult};
pub use orchestrator::Orchestrator;
pub use postprocess::Postprocessor;
pub use provider::{
    AnthropicClient, LlmClient, LlmRequest, LlmResponse, OpenAiCompatibleClient, Provider,
    ScriptedClient, ScriptedReply,
};
pub use stream::{ChunkSender, ChunkStream, SseDecoder};
