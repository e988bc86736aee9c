//! The deterministic generation pipeline.
//!
//! The RNG is consumed in a fixed order: genre resolution, instrument
//! selection, style tags, vocal descriptor, key, chords, recording, header
//! mood, sections, and finally the title. Formatting and BPM resolution draw
//! nothing. Nothing here reads the clock or unseeded entropy.

use tracing::{debug, info};
use tunesmith_registry::defaults::DEFAULT_MOOD;
use tunesmith_registry::phrases::{RECORDING_ACOUSTIC, RECORDING_ELECTRONIC};
use tunesmith_registry::tags::is_electronic;
use tunesmith_registry::{genre, GenreDefinition, GenreFamily, GENRES};
use tunesmith_spec::{
    EnrichmentResult, GenerationRequest, PromptMode, ResolvedGenre, TraceCollector, MAX_CHARS,
};

use crate::blending::{build_vocal_descriptor, select_instruments_for_multi_genre};
use crate::bpm::{resolve_bpm_range, BpmSource};
use crate::format::{fit_with_locked_phrase, format_max, format_standard, title_case, PromptFields};
use crate::harmony::{select_chord_progression, select_key};
use crate::resolver::{detect_mood_category, resolve_genre};
use crate::rng::{pick, RandomSource};
use crate::sections::{build_all_sections, capitalize_first, SectionInput};
use crate::selection::{select_instruments, SelectionOptions};
use crate::style::{assemble_style_tags, LEAN_TAG_BUDGET};
use crate::title::generate_title;

/// Limits applied during assembly and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub max_chars: usize,
    pub tag_budget: usize,
    pub max_instruments: usize,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            max_chars: MAX_CHARS,
            tag_budget: LEAN_TAG_BUDGET,
            max_instruments: 6,
        }
    }
}

/// Everything assembled for one request, before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub genre: ResolvedGenre,
    /// Genre as shown in the prompt ("Jazz", "Jazz Rock").
    pub display_genre: String,
    pub family: GenreFamily,
    /// Single capitalized mood for the standard header.
    pub header_mood: String,
    pub enrichment: EnrichmentResult,
    pub recording: String,
    /// Rendered section blocks.
    pub sections: String,
    pub bpm_source: BpmSource,
}

impl Assembly {
    /// Serializes in the request's mode, showing at most `tag_limit` style
    /// tags and fitting the locked phrase and body into `max_chars`.
    pub fn render(&self, request: &GenerationRequest, tag_limit: usize, max_chars: usize) -> String {
        let tags = &self.enrichment.style_tags;
        let fields = PromptFields {
            genre: &self.display_genre,
            mood: &self.header_mood,
            moods: &self.enrichment.moods,
            key: &self.enrichment.key,
            bpm: &self.enrichment.bpm_range,
            instruments: &self.enrichment.instruments,
            style_tags: &tags[..tag_limit.min(tags.len())],
            recording: &self.recording,
            sections: &self.sections,
            use_suno_tags: request.use_suno_tags,
        };
        let body = match request.prompt_mode() {
            PromptMode::Max => format_max(&fields),
            PromptMode::Standard => format_standard(&fields),
        };
        fit_with_locked_phrase(&body, request.locked_phrase(), max_chars)
    }
}

/// A prompt produced without any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterministicPrompt {
    pub text: String,
    pub title: String,
    pub assembly: Assembly,
}

/// Resolves the genre and assembles every field the formatter needs.
pub fn assemble(
    request: &GenerationRequest,
    options: &AssemblyOptions,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> Assembly {
    let resolved = resolve_genre(&request.description, request.genre_override(), rng, trace);
    let components: Vec<&'static GenreDefinition> =
        resolved.components.iter().filter_map(|id| genre(id)).collect();
    let primary = components.first().copied().unwrap_or(&GENRES[0]);

    let instruments = if components.len() > 1 {
        select_instruments_for_multi_genre(&components, options.max_instruments, rng, trace)
    } else {
        let selection = SelectionOptions {
            max_tags: options.max_instruments,
            allow_optional: true,
        };
        select_instruments(primary, selection, rng, trace)
    };

    let style = assemble_style_tags(&components, options.tag_budget, rng, trace);
    let vocal_style = build_vocal_descriptor(&components, rng);
    let key = select_key(primary, rng, trace);
    let chord_progression = select_chord_progression(primary, rng, trace);

    let bpm = resolve_bpm_range(&resolved.components);
    trace.decision("bpm", "range", bpm.source.as_str(), bpm.range.clone());

    let recordings = if is_electronic(primary.id) {
        RECORDING_ELECTRONIC
    } else {
        RECORDING_ACOUSTIC
    };
    let recording = pick(rng, recordings).copied().unwrap_or_default().to_string();

    let header_mood = header_mood(&request.description, &style.moods, rng, trace);

    let sections = build_all_sections(
        &SectionInput {
            family: primary.family,
            mood: &header_mood,
            instruments: &instruments,
            chords: Some(&chord_progression),
            vocal: Some(&vocal_style),
        },
        rng,
    )
    .text();

    let display_genre = if resolved.is_blend() {
        title_case(&resolved.display_genre)
    } else {
        primary.name.to_string()
    };

    debug!(
        genre = %display_genre,
        instruments = instruments.len(),
        tags = style.tags.len(),
        "assembly complete"
    );

    Assembly {
        enrichment: EnrichmentResult {
            moods: style.moods,
            instruments_formatted: instruments.join(", "),
            instruments,
            vocal_style,
            production: style.production,
            style_tags: style.tags,
            chord_progression,
            bpm_range: bpm.range,
            key,
        },
        genre: resolved,
        display_genre,
        family: primary.family,
        header_mood,
        recording,
        sections,
        bpm_source: bpm.source,
    }
}

/// Mood for the standard header: a mood from the category the description
/// triggers, else the first drawn genre mood, else the default.
fn header_mood(
    description: &str,
    genre_moods: &[String],
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> String {
    if let Some(category) = detect_mood_category(description) {
        if let Some(mood) = pick(rng, category.moods) {
            trace.decision("mood", "header", "category", format!("description reads {}", category.name));
            return capitalize_first(mood);
        }
    }
    match genre_moods.first() {
        Some(mood) => {
            trace.decision("mood", "header", "genre", "first genre mood");
            capitalize_first(mood)
        }
        None => {
            trace.decision("mood", "header", "default", "no mood available");
            DEFAULT_MOOD.to_string()
        }
    }
}

/// Runs the whole deterministic pipeline.
pub fn generate(
    request: &GenerationRequest,
    options: &AssemblyOptions,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> DeterministicPrompt {
    let assembly = assemble(request, options, rng, trace);
    let text = assembly.render(request, options.tag_budget, options.max_chars);
    let title = generate_title(&assembly.header_mood, rng);
    info!(chars = text.chars().count(), mode = %request.prompt_mode(), "deterministic prompt generated");
    DeterministicPrompt {
        text,
        title,
        assembly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use crate::style::ENRICHED_TAG_BUDGET;
    use pretty_assertions::assert_eq;

    fn run(request: &GenerationRequest, seed: u32) -> DeterministicPrompt {
        generate(
            request,
            &AssemblyOptions::default(),
            &mut SeededRandom::new(seed),
            &mut TraceCollector::default(),
        )
    }

    #[test]
    fn test_same_seed_same_prompt() {
        let request = GenerationRequest::builder("rainy night jazz").build();
        for seed in [0, 1, 42, u32::MAX] {
            assert_eq!(run(&request, seed), run(&request, seed));
        }
    }

    #[test]
    fn test_standard_mode_fields_present() {
        let request = GenerationRequest::builder("smooth jazz night session").build();
        let prompt = run(&request, 7);
        let text = &prompt.text;
        assert!(text.starts_with('['));
        assert!(text.contains(", Jazz, Key: "));
        for label in ["\nGenre: Jazz\n", "\nBPM: between 80 and 180\n", "\nMood: ", "\nInstruments: "] {
            assert!(text.contains(label), "missing {:?} in {}", label, text);
        }
        assert!(!text.contains("Style Tags:"));
        assert!(text.contains("[VERSE]"));
        assert!(!prompt.title.is_empty());
    }

    #[test]
    fn test_max_mode_fields_present() {
        let request = GenerationRequest::builder("anything")
            .genre("jazz rock")
            .max_mode(true)
            .build();
        let text = run(&request, 3).text;
        assert!(text.starts_with("[Is_MAX_MODE: MAX](MAX)\n[QUALITY: MAX](MAX)\n[REALISM: MAX](MAX)\n"));
        assert!(text.contains("\ngenre: \"jazz rock\"\n"));
        assert!(text.contains("\nbpm: \"between "));
        assert!(text.contains("\ninstruments: \""));
        assert!(text.contains("\nstyle tags: \""));
        assert!(text.contains("\nrecording: \""));
    }

    #[test]
    fn test_locked_phrase_is_last_line() {
        let request = GenerationRequest::builder("calm ambient drift")
            .locked_phrase("featuring a theremin")
            .build();
        let text = run(&request, 9).text;
        assert_eq!(text.lines().last(), Some("featuring a theremin"));
    }

    #[test]
    fn test_output_within_budget() {
        let request = GenerationRequest::builder("epic cinematic battle")
            .genre("cinematic classical rock metal")
            .suno_tags(true)
            .build();
        let options = AssemblyOptions {
            max_chars: 300,
            ..AssemblyOptions::default()
        };
        let prompt = generate(
            &request,
            &options,
            &mut SeededRandom::new(1),
            &mut TraceCollector::disabled(),
        );
        assert!(prompt.text.chars().count() <= 300);
    }

    #[test]
    fn test_enriched_assembly_renders_like_lean_path() {
        let request = GenerationRequest::builder("lofi beats to study to")
            .suno_tags(true)
            .build();
        let lean = run(&request, 21);

        let rich_options = AssemblyOptions {
            tag_budget: ENRICHED_TAG_BUDGET,
            ..AssemblyOptions::default()
        };
        let mut rng = SeededRandom::new(21);
        let rich = assemble(&request, &rich_options, &mut rng, &mut TraceCollector::disabled());
        let text = rich.render(&request, LEAN_TAG_BUDGET, MAX_CHARS);
        assert_eq!(text, lean.text);
        assert_eq!(generate_title(&rich.header_mood, &mut rng), lean.title);
    }

    #[test]
    fn test_header_mood_from_description_category() {
        let request = GenerationRequest::builder("a sad rainy jazz evening").build();
        let prompt = run(&request, 5);
        let moods = ["Melancholic", "Wistful", "Bittersweet", "Somber"];
        assert!(moods.contains(&prompt.assembly.header_mood.as_str()));
    }

    #[test]
    fn test_blend_display_genre() {
        let request = GenerationRequest::builder("x").genre("lofi/hiphop").build();
        let prompt = run(&request, 2);
        assert_eq!(prompt.assembly.display_genre, "Lofi/hiphop");
        assert_eq!(prompt.assembly.genre.components, vec!["lofi", "hiphop"]);
        assert_eq!(prompt.assembly.bpm_source, BpmSource::Blended);
    }

    #[test]
    fn test_trace_records_decisions() {
        let request = GenerationRequest::builder("techno warehouse").build();
        let mut trace = TraceCollector::default();
        generate(&request, &AssemblyOptions::default(), &mut SeededRandom::new(4), &mut trace);
        let domains: Vec<&str> = trace
            .events()
            .iter()
            .filter_map(|e| match e {
                tunesmith_spec::TraceEvent::Decision(d) => Some(d.domain.as_str()),
                _ => None,
            })
            .collect();
        for domain in ["genre", "instruments", "style", "harmony", "bpm", "mood"] {
            assert!(domains.contains(&domain), "no {} decision", domain);
        }
    }
}
