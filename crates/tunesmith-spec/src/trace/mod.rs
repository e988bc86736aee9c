//! Decision trace for one generation call.
//!
//! A [`TraceRun`] is the structured, size-capped timeline of everything a
//! generation call decided: genre resolution branches, pool draws, LLM calls
//! with their telemetry, and soft errors. Events are append-only within a run
//! and `stats` is always derived from the event list.

mod collector;
mod compact;


use serde::{Deserialize, Serialize};

use crate::request::PromptMode;

pub use collector::{TraceCollector, TraceHeader, TraceOptions};

/// Default serialized size cap for a persisted trace.
pub const TRACE_MAX_BYTES: usize = 64 * 1024;

/// Default cap on the number of events kept in one run.
pub const TRACE_MAX_EVENTS: usize = 500;

/// Strings inside LLM call events are clipped to this many characters first
/// when a trace is compacted.
pub const TRACE_CLIP_CHARS: usize = 2000;

/// A complete trace for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRun {
    /// What was run (e.g., "generate").
    pub action: String,
    /// Wire format of the prompt.
    pub prompt_mode: PromptMode,
    /// RFC 3339 capture timestamp.
    pub captured_at: String,
    /// RNG provenance.
    pub rng: RngInfo,
    /// Canonical hash of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_hash: Option<String>,
    /// Ordered timeline.
    pub events: Vec<TraceEvent>,
    /// Derived counters.
    pub stats: TraceStats,
}

/// RNG provenance for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngInfo {
    /// Seed the run's RandomSource was built from.
    pub seed: u32,
}

/// Counters derived from the event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TraceStats {
    pub event_count: usize,
    pub decision_count: usize,
    pub llm_call_count: usize,
    pub error_count: usize,
    /// Serialized size in bytes, measured after compaction.
    pub size_bytes: usize,
    /// Set when events were dropped or clipped to respect a cap.
    pub truncated_for_cap: bool,
    pub had_errors: bool,
    /// BLAKE3 hash of the final prompt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_hash: Option<String>,
}

/// One entry on the trace timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TraceEvent {
    #[serde(rename = "run.start")]
    RunStart(RunStartEvent),
    #[serde(rename = "run.end")]
    RunEnd(RunEndEvent),
    #[serde(rename = "llm.call")]
    LlmCall(LlmCallEvent),
    #[serde(rename = "decision")]
    Decision(DecisionEvent),
    #[serde(rename = "error")]
    Error(ErrorEvent),
}

impl TraceEvent {
    /// Position of the event in its run.
    pub fn seq(&self) -> usize {
        match self {
            TraceEvent::RunStart(e) => e.seq,
            TraceEvent::RunEnd(e) => e.seq,
            TraceEvent::LlmCall(e) => e.seq,
            TraceEvent::Decision(e) => e.seq,
            TraceEvent::Error(e) => e.seq,
        }
    }

    /// Returns the event type tag as serialized.
    pub fn kind(&self) -> &'static str {
        match self {
            TraceEvent::RunStart(_) => "run.start",
            TraceEvent::RunEnd(_) => "run.end",
            TraceEvent::LlmCall(_) => "llm.call",
            TraceEvent::Decision(_) => "decision",
            TraceEvent::Error(_) => "error",
        }
    }

    fn set_seq(&mut self, seq: usize) {
        match self {
            TraceEvent::RunStart(e) => e.seq = seq,
            TraceEvent::RunEnd(e) => e.seq = seq,
            TraceEvent::LlmCall(e) => e.seq = seq,
            TraceEvent::Decision(e) => e.seq = seq,
            TraceEvent::Error(e) => e.seq = seq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStartEvent {
    pub seq: usize,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_override: Option<String>,
    pub lyrics_mode: bool,
    pub use_suno_tags: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunEndEvent {
    pub seq: usize,
    pub output_chars: usize,
    pub used_llm: bool,
    /// True when the LLM path failed and the deterministic prompt was returned.
    pub fell_back: bool,
}

/// One LLM request/response pair with telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmCallEvent {
    pub seq: usize,
    pub provider: String,
    /// Pipeline step that issued the call ("generate", "rewrite", "dedup", ...).
    pub step: String,
    pub request: LlmRequestRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<LlmResponseRecord>,
    pub telemetry: LlmTelemetry,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmRequestRecord {
    pub model: String,
    pub system: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponseRecord {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LlmTelemetry {
    pub latency_ms: u64,
    pub ok: bool,
    pub timed_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// A branch taken by a deterministic or postprocessing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEvent {
    pub seq: usize,
    /// Component that decided ("genre", "instruments", "style", "postprocess", ...).
    pub domain: String,
    /// What was decided ("resolve", "pool.rhythm", "dedup", ...).
    pub key: String,
    pub branch_taken: String,
    pub why: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionMeta>,
}

/// What a selection step drew from and what it kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMeta {
    pub candidates: usize,
    pub chosen: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    pub seq: usize,
    /// Error class, e.g. "llm.timeout" or "validation.warning".
    pub error_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl TraceRun {
    /// Serializes the trace to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the trace to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a trace from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Standard filename for a persisted trace of the given seed.
    ///
    /// ```
    /// use tunesmith_spec::trace::TraceRun;
    /// assert_eq!(TraceRun::filename(42), "tunesmith-42.trace.json");
    /// ```
    pub fn filename(seed: u32) -> String {
        format!("tunesmith-{}.trace.json", seed)
    }

    /// Iterates over decision events only.
    pub fn decisions(&self) -> impl Iterator<Item = &DecisionEvent> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Decision(d) => Some(d),
            _ => None,
        })
    }

    /// Iterates over LLM call events only.
    pub fn llm_calls(&self) -> impl Iterator<Item = &LlmCallEvent> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::LlmCall(c) => Some(c),
            _ => None,
        })
    }

    /// Recomputes the event counters. Size and cap flags are left untouched.
    pub fn recompute_counts(&mut self) {
        let mut stats = TraceStats {
            size_bytes: self.stats.size_bytes,
            truncated_for_cap: self.stats.truncated_for_cap,
            output_hash: self.stats.output_hash.take(),
            ..TraceStats::default()
        };
        stats.event_count = self.events.len();
        for event in &self.events {
            match event {
                TraceEvent::Decision(_) => stats.decision_count += 1,
                TraceEvent::LlmCall(_) => stats.llm_call_count += 1,
                TraceEvent::Error(_) => stats.error_count += 1,
                TraceEvent::RunStart(_) | TraceEvent::RunEnd(_) => {}
            }
        }
        stats.had_errors = stats.error_count > 0;
        self.stats = stats;
    }
}
