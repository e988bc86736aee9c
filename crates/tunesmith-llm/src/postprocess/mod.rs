//! Postprocessing of model output.
//!
//! Runs after a successful generation call:
//!
//! 1. scrub leaked meta lines
//! 2. if leakage remains, one rewrite call, then scrub again
//! 3. repair a missing header
//! 4. if more than three distinct words repeat, one condense-with-dedup call
//! 5. if over budget, one condense call, then hard truncation
//! 6. scrub again
//! 7. re-append the locked phrase if the model dropped it
//!
//! Sub-call failures are soft: they are logged, recorded in the trace, and
//! the previous text is kept.

pub mod dedup;
pub mod format;
pub mod leak;

use tokio_util::sync::CancellationToken;
use tunesmith_engine::{fit_with_locked_phrase, truncate_prompt};
use tunesmith_spec::{PromptMode, TraceCollector};

use crate::call::soft_call;
use crate::config::CallOptions;
use crate::prompts::{
    condense_dedup_prompt, condense_to_prompt, rewrite_without_meta_prompt, CONDENSE_SYSTEM,
    REWRITE_SYSTEM,
};
use crate::provider::{LlmClient, LlmRequest};

pub use dedup::{find_repeated_words, needs_dedup, DEDUP_TRIGGER, MIN_WORD_CHARS};
pub use format::{validate_and_fix_format, FormatFix};
pub use leak::{has_leaked_meta, scrub_leaked_meta, LEAKED_META_PATTERNS, MIN_SCRUBBED_CHARS};

/// Sampling temperature for cleanup calls.
const CLEANUP_TEMPERATURE: f32 = 0.3;

/// Everything the postprocess pipeline needs besides the text.
pub struct Postprocessor<'a, C> {
    pub client: &'a C,
    pub call: &'a CallOptions,
    pub cancel: &'a CancellationToken,
    pub mode: PromptMode,
    pub max_chars: usize,
    pub locked_phrase: Option<&'a str>,
}

impl<C: LlmClient> Postprocessor<'_, C> {
    /// Runs every step over `text`.
    pub async fn run(&self, text: String, trace: &mut TraceCollector) -> String {
        let mut text = self.scrub(text, "initial", trace);

        if has_leaked_meta(&text) {
            trace.decision("postprocess", "rewrite", "called", "leaked meta survived scrubbing");
            let prompt = rewrite_without_meta_prompt(&text);
            if let Some(rewritten) = self.sub_call("rewrite", REWRITE_SYSTEM, prompt, trace).await {
                text = self.scrub(rewritten, "after_rewrite", trace);
            }
        }

        let fix = validate_and_fix_format(&text, self.mode);
        if fix.repaired {
            trace.decision("postprocess", "format", "repaired", "output did not open with a header");
        }
        text = fix.text;

        let repeated = find_repeated_words(&text);
        if needs_dedup(&repeated) {
            trace.decision(
                "postprocess",
                "dedup",
                "called",
                format!("{} repeated words: {}", repeated.len(), repeated.join(", ")),
            );
            let prompt = condense_dedup_prompt(&text, &repeated, self.max_chars);
            if let Some(condensed) = self.sub_call("dedup", CONDENSE_SYSTEM, prompt, trace).await {
                text = condensed;
            }
        } else {
            trace.decision(
                "postprocess",
                "dedup",
                "skipped",
                format!("{} repeated words", repeated.len()),
            );
        }

        text = self.ensure_length(text, trace).await;
        text = self.scrub(text, "final", trace);
        self.ensure_locked_phrase(text, trace)
    }

    fn scrub(&self, text: String, stage: &str, trace: &mut TraceCollector) -> String {
        if !has_leaked_meta(&text) {
            return text;
        }
        let scrubbed = scrub_leaked_meta(&text);
        let branch = if scrubbed == text { "kept_original" } else { "scrubbed" };
        trace.decision("postprocess", &format!("scrub.{}", stage), branch, "leaked meta lines found");
        scrubbed
    }

    async fn ensure_length(&self, text: String, trace: &mut TraceCollector) -> String {
        let len = text.chars().count();
        if len <= self.max_chars {
            return text;
        }
        trace.decision(
            "postprocess",
            "length",
            "condense",
            format!("{} chars over a {} budget", len, self.max_chars),
        );
        let prompt = condense_to_prompt(&text, self.max_chars);
        let text = match self.sub_call("condense", CONDENSE_SYSTEM, prompt, trace).await {
            Some(condensed) => condensed,
            None => text,
        };
        if text.chars().count() > self.max_chars {
            trace.decision("postprocess", "length", "truncate", "still over budget after condensing");
            return truncate_prompt(&text, self.max_chars);
        }
        text
    }

    fn ensure_locked_phrase(&self, text: String, trace: &mut TraceCollector) -> String {
        let Some(phrase) = self.locked_phrase else {
            return truncate_prompt(&text, self.max_chars);
        };
        let last_line = text.lines().last().map(str::trim);
        if last_line == Some(phrase) && text.chars().count() <= self.max_chars {
            return text;
        }
        trace.decision("postprocess", "locked_phrase", "reappended", "phrase not on the last line or over budget");
        let body: Vec<&str> = text.lines().filter(|line| line.trim() != phrase).collect();
        fit_with_locked_phrase(&body.join("\n"), Some(phrase), self.max_chars)
    }

    /// One bounded cleanup call. `None` on failure.
    async fn sub_call(
        &self,
        step: &str,
        system: &str,
        prompt: String,
        trace: &mut TraceCollector,
    ) -> Option<String> {
        let request = LlmRequest::new(self.client.model(), system, prompt).with_temperature(CLEANUP_TEMPERATURE);
        soft_call(self.client, &request, self.call, self.cancel, step, trace).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::provider::{ScriptedClient, ScriptedReply};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tunesmith_spec::TraceEvent;

    const CLEAN: &str = "[Dark, Techno, Key: A minor]\n\nGenre: Techno\nBPM: 125-135\nMood: hypnotic, driving\nInstruments: acid bassline, drum machine";

    fn options() -> CallOptions {
        CallOptions {
            max_retries: 0,
            timeout: Duration::from_millis(200),
            backoff_initial: Duration::from_millis(1),
            backoff_max: Duration::from_millis(1),
        }
    }

    async fn run_with(
        client: &ScriptedClient,
        text: &str,
        max_chars: usize,
        locked_phrase: Option<&str>,
    ) -> (String, TraceCollector) {
        let call = options();
        let cancel = CancellationToken::new();
        let post = Postprocessor {
            client,
            call: &call,
            cancel: &cancel,
            mode: PromptMode::Standard,
            max_chars,
            locked_phrase,
        };
        let mut trace = TraceCollector::default();
        let out = post.run(text.to_string(), &mut trace).await;
        (out, trace)
    }

    fn steps(trace: &TraceCollector) -> Vec<String> {
        trace
            .events()
            .iter()
            .filter_map(|e| match e {
                TraceEvent::LlmCall(call) => Some(call.step.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_clean_text_passes_without_calls() {
        let client = ScriptedClient::empty();
        let (out, trace) = run_with(&client, CLEAN, 1000, None).await;
        assert_eq!(out, CLEAN);
        assert!(steps(&trace).is_empty());
    }

    #[tokio::test]
    async fn test_dedup_called_when_many_words_repeat() {
        let repetitive = "[Calm, Ambient]\n\nwarm glassy tape drones float slowly\nwarm glassy tape drones float";
        let client = ScriptedClient::with_texts(["[Calm, Ambient]\n\nwarm glassy tape drones float slowly"]);
        let (out, trace) = run_with(&client, repetitive, 1000, None).await;
        assert_eq!(steps(&trace), vec!["dedup"]);
        let prompt = &client.requests()[0].prompt;
        assert!(prompt.contains("warm, glassy, tape, drones, float"));
        assert_eq!(out, "[Calm, Ambient]\n\nwarm glassy tape drones float slowly");
    }

    #[tokio::test]
    async fn test_dedup_skipped_for_two_repeats() {
        let text = "[Calm, Ambient]\n\nwarm glassy tape drones float slowly\nwarm glassy horizon";
        let client = ScriptedClient::empty();
        let (out, trace) = run_with(&client, text, 1000, None).await;
        assert!(steps(&trace).is_empty());
        assert_eq!(out, text);
    }

    #[tokio::test]
    async fn test_failed_dedup_keeps_text() {
        let repetitive = "[Calm, Ambient]\n\nwarm glassy tape drones float slowly\nwarm glassy tape drones float";
        let client = ScriptedClient::new([ScriptedReply::fail(LlmError::bad_status(500, "down"))]);
        let (out, trace) = run_with(&client, repetitive, 1000, None).await;
        assert_eq!(out, repetitive);
        assert!(trace.events().iter().any(|e| matches!(e, TraceEvent::Error(err) if err.status == Some(500))));
    }

    #[tokio::test]
    async fn test_leak_scrubbed_without_rewrite() {
        let text = format!("Here is your prompt:\n{}", CLEAN);
        let client = ScriptedClient::empty();
        let (out, trace) = run_with(&client, &text, 1000, None).await;
        assert_eq!(out, CLEAN);
        assert!(steps(&trace).is_empty());
    }

    #[tokio::test]
    async fn test_persistent_leak_triggers_rewrite() {
        // Too short to scrub, so the leak survives and a rewrite is requested.
        let text = "Here is your prompt:\nGenre: Jazz";
        let client = ScriptedClient::with_texts([CLEAN]);
        let (out, trace) = run_with(&client, text, 1000, None).await;
        assert_eq!(steps(&trace), vec!["rewrite"]);
        assert_eq!(out, CLEAN);
    }

    #[tokio::test]
    async fn test_over_budget_condensed_then_truncated() {
        let long = format!("{}\n{}", CLEAN, "x".repeat(300));
        let client = ScriptedClient::with_texts([long.clone()]);
        let (out, trace) = run_with(&client, &long, 150, None).await;
        assert_eq!(steps(&trace), vec!["condense"]);
        assert!(out.chars().count() <= 150);
        assert!(out.starts_with("[Dark, Techno"));
    }

    #[tokio::test]
    async fn test_condense_success_within_budget() {
        let long = format!("{}\n{}", CLEAN, "y".repeat(300));
        let client = ScriptedClient::with_texts([CLEAN]);
        let (out, _) = run_with(&client, &long, 200, None).await;
        assert_eq!(out, CLEAN);
    }

    #[tokio::test]
    async fn test_locked_phrase_reappended() {
        let client = ScriptedClient::empty();
        let (out, _) = run_with(&client, CLEAN, 1000, Some("Hold the line")).await;
        assert_eq!(out, format!("{}\nHold the line", CLEAN));

        let kept = format!("{}\nHold the line", CLEAN);
        let (out, _) = run_with(&client, &kept, 1000, Some("Hold the line")).await;
        assert_eq!(out, kept);
    }

    #[tokio::test]
    async fn test_locked_phrase_inside_longer_line_gets_own_line() {
        let client = ScriptedClient::empty();
        let text = format!("{}\nHold the line of warm pads then fade", CLEAN);
        let (out, trace) = run_with(&client, &text, 1000, Some("Hold the line")).await;
        assert_eq!(out, format!("{}\nHold the line", text));
        assert_eq!(out.lines().last(), Some("Hold the line"));
        assert!(trace
            .events()
            .iter()
            .any(|e| matches!(e, TraceEvent::Decision(d) if d.key == "locked_phrase")));
    }

    #[tokio::test]
    async fn test_locked_phrase_moved_to_last_line() {
        let client = ScriptedClient::empty();
        let text = format!("{}\nHold the line\nFade out slowly", CLEAN);
        let (out, _) = run_with(&client, &text, 1000, Some("Hold the line")).await;
        assert_eq!(out, format!("{}\nFade out slowly\nHold the line", CLEAN));
    }
}
