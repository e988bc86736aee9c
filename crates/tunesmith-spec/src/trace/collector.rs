//! Append-only event collector for one generation call.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{
    DecisionEvent, ErrorEvent, LlmCallEvent, RngInfo, RunEndEvent, RunStartEvent, SelectionMeta,
    TraceEvent, TraceRun, TraceStats, TRACE_MAX_BYTES, TRACE_MAX_EVENTS,
};
use crate::hash::blake3_hash_str;
use crate::request::{GenerationRequest, PromptMode};

/// Trace capture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Whether events are recorded at all.
    pub enabled: bool,
    /// Serialized size cap applied by [`TraceRun::compact`].
    pub max_bytes: usize,
    /// Maximum number of events kept.
    pub max_events: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: TRACE_MAX_BYTES,
            max_events: TRACE_MAX_EVENTS,
        }
    }
}

/// Run-level fields supplied when a collector is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceHeader {
    pub action: String,
    pub prompt_mode: PromptMode,
    pub captured_at: String,
    pub seed: u32,
    pub request_hash: Option<String>,
}

impl TraceHeader {
    /// Creates a header stamped with the current UTC time.
    pub fn new(action: impl Into<String>, prompt_mode: PromptMode, seed: u32) -> Self {
        Self {
            action: action.into(),
            prompt_mode,
            captured_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            seed,
            request_hash: None,
        }
    }

    /// Attaches the canonical request hash.
    pub fn with_request_hash(mut self, hash: impl Into<String>) -> Self {
        self.request_hash = Some(hash.into());
        self
    }
}

/// Collects trace events for a single generation call.
///
/// A collector is owned by exactly one call chain. When the event cap is
/// reached the oldest decision event is evicted to make room; LLM calls,
/// errors and run boundaries are never evicted.
#[derive(Debug, Clone)]
pub struct TraceCollector {
    options: TraceOptions,
    events: Vec<TraceEvent>,
    next_seq: usize,
    dropped: usize,
}

impl TraceCollector {
    /// Creates a collector with the given options.
    pub fn new(options: TraceOptions) -> Self {
        Self {
            options,
            events: Vec::new(),
            next_seq: 0,
            dropped: 0,
        }
    }

    /// Creates a collector that records nothing.
    pub fn disabled() -> Self {
        Self::new(TraceOptions {
            enabled: false,
            ..TraceOptions::default()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of events evicted because of the event cap.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn push(&mut self, mut event: TraceEvent) {
        if !self.options.enabled {
            return;
        }
        if self.events.len() >= self.options.max_events {
            let oldest_decision = self
                .events
                .iter()
                .position(|e| matches!(e, TraceEvent::Decision(_)));
            match (oldest_decision, &event) {
                (Some(index), _) => {
                    self.events.remove(index);
                    self.dropped += 1;
                }
                (None, TraceEvent::Decision(_)) => {
                    self.dropped += 1;
                    return;
                }
                // Boundaries, calls and errors are kept past the cap.
                (None, _) => {}
            }
        }
        event.set_seq(self.next_seq);
        self.next_seq += 1;
        self.events.push(event);
    }

    /// Records the start of a run.
    pub fn run_start(&mut self, request: &GenerationRequest, provider: Option<&str>) {
        self.push(TraceEvent::RunStart(RunStartEvent {
            seq: 0,
            description: request.description.clone(),
            genre_override: request.genre_override().map(str::to_string),
            lyrics_mode: request.lyrics_mode,
            use_suno_tags: request.use_suno_tags,
            provider: provider.map(str::to_string),
        }));
    }

    /// Records the end of a run.
    pub fn run_end(&mut self, output_chars: usize, used_llm: bool, fell_back: bool) {
        self.push(TraceEvent::RunEnd(RunEndEvent {
            seq: 0,
            output_chars,
            used_llm,
            fell_back,
        }));
    }

    /// Records a decision.
    pub fn decision(
        &mut self,
        domain: &str,
        key: &str,
        branch_taken: impl Into<String>,
        why: impl Into<String>,
    ) {
        if !self.options.enabled {
            return;
        }
        self.push(TraceEvent::Decision(DecisionEvent {
            seq: 0,
            domain: domain.to_string(),
            key: key.to_string(),
            branch_taken: branch_taken.into(),
            why: why.into(),
            selection: None,
        }));
    }

    /// Records a decision together with what it selected.
    pub fn selection(
        &mut self,
        domain: &str,
        key: &str,
        why: impl Into<String>,
        candidates: usize,
        chosen: &[String],
    ) {
        if !self.options.enabled {
            return;
        }
        self.push(TraceEvent::Decision(DecisionEvent {
            seq: 0,
            domain: domain.to_string(),
            key: key.to_string(),
            branch_taken: "selected".to_string(),
            why: why.into(),
            selection: Some(SelectionMeta {
                candidates,
                chosen: chosen.to_vec(),
            }),
        }));
    }

    /// Records an LLM call. The event's `seq` is assigned here.
    pub fn llm_call(&mut self, event: LlmCallEvent) {
        self.push(TraceEvent::LlmCall(event));
    }

    /// Records a non-fatal error.
    pub fn error(&mut self, error_type: &str, message: impl Into<String>, status: Option<u16>) {
        self.push(TraceEvent::Error(ErrorEvent {
            seq: 0,
            error_type: error_type.to_string(),
            message: message.into(),
            status,
        }));
    }

    /// Finishes the run, computing stats and compacting to the size cap.
    ///
    /// Returns `None` when the collector is disabled.
    pub fn finish(self, header: TraceHeader, output_text: &str) -> Option<TraceRun> {
        if !self.options.enabled {
            return None;
        }

        let mut run = TraceRun {
            action: header.action,
            prompt_mode: header.prompt_mode,
            captured_at: header.captured_at,
            rng: RngInfo { seed: header.seed },
            request_hash: header.request_hash,
            events: self.events,
            stats: TraceStats {
                truncated_for_cap: self.dropped > 0,
                output_hash: Some(blake3_hash_str(output_text)),
                ..TraceStats::default()
            },
        };
        run.compact(self.options.max_bytes);
        Some(run)
    }
}

impl Default for TraceCollector {
    fn default() -> Self {
        Self::new(TraceOptions::default())
    }
}
