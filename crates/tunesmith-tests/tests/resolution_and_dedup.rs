//! Genre resolution, truncation and deduplication checks.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tunesmith-tests --test resolution_and_dedup
//! ```

use pretty_assertions::assert_eq;
use tunesmith_engine::{resolve_genre, truncate_prompt, SeededRandom};
use tunesmith_llm::postprocess::dedup::{find_repeated_words, needs_dedup};
use tunesmith_llm::{Orchestrator, ScriptedClient};
use tunesmith_spec::{GenerationRequest, TraceCollector};
use tunesmith_tests::fixtures::{fast_config, runtime};

#[test]
fn test_keyword_in_description_selects_genre() {
    let mut rng = SeededRandom::new(1);
    let resolved = resolve_genre(
        "smooth jazz night session",
        None,
        &mut rng,
        &mut TraceCollector::disabled(),
    );
    assert_eq!(resolved.detected.as_deref(), Some("jazz"));
    assert_eq!(resolved.components, vec!["jazz".to_string()]);
    assert_eq!(resolved.primary_genre, "jazz");
}

#[test]
fn test_compound_override_keeps_every_component() {
    let mut rng = SeededRandom::new(1);
    let resolved = resolve_genre(
        "random words",
        Some("jazz rock"),
        &mut rng,
        &mut TraceCollector::disabled(),
    );
    assert_eq!(resolved.components, vec!["jazz".to_string(), "rock".to_string()]);
    assert_eq!(resolved.display_genre, "jazz rock");
    assert_eq!(resolved.primary_genre, "jazz");
}

#[test]
fn test_short_text_is_not_truncated() {
    assert_eq!(truncate_prompt("short text", 100), "short text");
}

const FIVE_REPEATS: &str = "[Dreamy, Ambient, Key: C major]\n\n\
    Genre: Drone\n\
    Mood: shimmering glacial, shimmering drifting, glacial haze\n\
    Instruments: drifting synth pads, granular textures, granular piano, warm pads";

const TWO_REPEATS: &str = "[Dreamy, Ambient, Key: C major]\n\n\
    Genre: Drone\n\
    Mood: shimmering, glacial, shimmering haze\n\
    Instruments: synth pads, granular textures, felt piano, granular noise";

#[test]
fn test_dedup_triggers_at_three_repeated_words() {
    let repeated = find_repeated_words(FIVE_REPEATS);
    assert_eq!(repeated.len(), 5, "repeated: {:?}", repeated);
    assert!(needs_dedup(&repeated));

    let repeated = find_repeated_words(TWO_REPEATS);
    assert_eq!(repeated.len(), 2, "repeated: {:?}", repeated);
    assert!(!needs_dedup(&repeated));
}

#[test]
fn test_dedup_call_only_when_threshold_reached() {
    let runtime = runtime();
    let request = GenerationRequest::builder("dreamy ambient drift").seed(4).build();

    let condensed = "[Dreamy, Ambient, Key: C major]\n\nGenre: Ambient\nMood: shimmering, glacial\nInstruments: synth pads, granular piano, distant choir";
    let client = ScriptedClient::with_texts([FIVE_REPEATS, condensed, "Glacier Light"]);
    let orchestrator = Orchestrator::with_client(fast_config(), client);
    let output = runtime.block_on(orchestrator.generate(&request)).unwrap();
    let steps: Vec<String> = output
        .debug_info
        .unwrap()
        .llm_calls()
        .map(|call| call.step.clone())
        .collect();
    assert_eq!(steps, vec!["generate", "dedup", "title"]);
    assert_eq!(output.text, condensed);

    let client = ScriptedClient::with_texts([TWO_REPEATS, "Glacier Light"]);
    let orchestrator = Orchestrator::with_client(fast_config(), client);
    let output = runtime.block_on(orchestrator.generate(&request)).unwrap();
    let steps: Vec<String> = output
        .debug_info
        .unwrap()
        .llm_calls()
        .map(|call| call.step.clone())
        .collect();
    assert_eq!(steps, vec!["generate", "title"]);
    assert_eq!(output.text, TWO_REPEATS);
}

#[test]
fn test_unknown_override_falls_back_to_detection() {
    let mut rng = SeededRandom::new(1);
    let mut trace = TraceCollector::default();
    let resolved = resolve_genre(
        "smooth jazz night session",
        Some("nonexistentgenre"),
        &mut rng,
        &mut trace,
    );
    assert_eq!(resolved.detected.as_deref(), Some("jazz"));
    assert_eq!(resolved.components, vec!["jazz".to_string()]);

    let runtime = runtime();
    let orchestrator = Orchestrator::<ScriptedClient>::without_client(fast_config());
    let request = GenerationRequest::builder("smooth jazz night session")
        .genre("nonexistentgenre")
        .seed(1)
        .build();
    let output = runtime.block_on(orchestrator.generate(&request)).unwrap();
    assert!(output.text.contains("Genre: Jazz"));
    let trace = output.debug_info.unwrap();
    assert!(trace.decisions().any(|d| d.key == "W001"));
}
