//! Shared requests and engine settings for integration tests.

use std::time::Duration;

use tunesmith_engine::{generate, DeterministicPrompt, SeededRandom};
use tunesmith_llm::{CallOptions, EngineConfig};
use tunesmith_spec::{GenerationRequest, TraceCollector};

/// Descriptions covering keyword detection, mood detection and the
/// no-match default.
pub const DESCRIPTIONS: &[&str] = &[
    "smooth jazz night session",
    "dark techno warehouse at 3am",
    "melancholic lofi study beats in the rain",
    "epic film score for a mountain battle",
    "acoustic campfire song about home",
    "heavy metal anthem with thrash riffs",
    "random words with no genre at all",
];

/// Compound overrides exercising the blending path.
pub const BLENDED_OVERRIDES: &[&str] = &["jazz rock", "lofi/hiphop", "ambient techno house", "folk, country, blues, soul"];

/// Engine settings with millisecond retry timing so failure paths stay fast.
pub fn fast_config() -> EngineConfig {
    EngineConfig::offline().with_call_options(CallOptions {
        max_retries: 1,
        timeout: Duration::from_millis(500),
        backoff_initial: Duration::from_millis(1),
        backoff_max: Duration::from_millis(2),
    })
}

/// Runs the deterministic pipeline with a fresh RNG for `seed`.
pub fn deterministic(request: &GenerationRequest, seed: u32) -> DeterministicPrompt {
    generate(
        request,
        &fast_config().lean_assembly(),
        &mut SeededRandom::new(seed),
        &mut TraceCollector::disabled(),
    )
}

/// A current-thread runtime for driving async orchestrator calls from
/// synchronous tests.
pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
}
