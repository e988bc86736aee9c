//! System and user prompts for every LLM step.

use tunesmith_engine::{Assembly, MAX_MODE_HEADER};
use tunesmith_spec::{GenerationRequest, PromptMode};

/// System prompt for the initial generation call.
pub fn generation_system(mode: PromptMode, max_chars: usize) -> String {
    let format = match mode {
        PromptMode::Standard => String::from(
            "Output format:\n\
             [Mood, Genre, Key: <key>]\n\n\
             Genre: <genre>\n\
             BPM: <range>\n\
             Mood: <moods>\n\
             Instruments: <instruments>\n\
             (optional) Style Tags: <tags>\n\
             (optional) Recording: <recording>\n\n\
             [INTRO] / [VERSE] / [CHORUS] / [BRIDGE] / [OUTRO] blocks, one or two lines each."
        ),
        PromptMode::Max => format!(
            "Output format, exactly:\n{}\n\
             genre: \"<genre>\"\n\
             bpm: \"<range>\"\n\
             instruments: \"<instruments>\"\n\
             style tags: \"<tags>\"\n\
             recording: \"<recording>\"",
            MAX_MODE_HEADER.join("\n")
        ),
    };
    format!(
        "You write style prompts for a generative music model. \
         Reply with the prompt only: no preamble, no explanations, no notes, no markdown. \
         Stay under {} characters. Never repeat a descriptive word.\n\n{}",
        max_chars, format
    )
}

/// User prompt for the initial generation call, carrying the assembled
/// context.
pub fn generation_prompt(request: &GenerationRequest, assembly: &Assembly) -> String {
    let e = &assembly.enrichment;
    let mut out = String::new();
    out.push_str(&format!("Description: {}\n", request.description.trim()));
    out.push_str(&format!("Genre: {}\n", assembly.display_genre));
    if assembly.genre.is_blend() {
        out.push_str(&format!("Blend of: {}\n", assembly.genre.components.join(", ")));
    }
    out.push_str(&format!("Mood: {}\n", assembly.header_mood));
    out.push_str(&format!("Supporting moods: {}\n", e.moods.join(", ")));
    out.push_str(&format!("Key: {}\n", e.key));
    out.push_str(&format!("BPM: {}\n", e.bpm_range));
    out.push_str(&format!("Instruments: {}\n", e.instruments_formatted));
    out.push_str(&format!("Vocals: {}\n", e.vocal_style));
    out.push_str(&format!("Production: {}\n", e.production));
    out.push_str(&format!("Chord progression: {}\n", e.chord_progression));
    out.push_str(&format!("Style tags: {}\n", e.style_tags.join(", ")));
    out.push_str(&format!("Recording: {}\n", assembly.recording));
    if request.use_suno_tags && request.prompt_mode() == PromptMode::Standard {
        out.push_str("Include the Style Tags and Recording lines.\n");
    }
    if let Some(phrase) = request.locked_phrase() {
        out.push_str(&format!("End with this exact line, unchanged: {}\n", phrase));
    }
    out.push_str("\nWrite the style prompt.");
    out
}

pub const REWRITE_SYSTEM: &str = "You clean up music style prompts. \
Return the prompt with every sentence addressed to the reader removed: no preamble, \
no notes, no commentary about the prompt. Keep the format and all musical content. \
Reply with the prompt only.";

/// Asks for the text without leaked assistant chatter.
pub fn rewrite_without_meta_prompt(text: &str) -> String {
    format!("Remove all commentary from this prompt:\n\n{}", text)
}

pub const CONDENSE_SYSTEM: &str = "You tighten music style prompts. \
Keep the format, field labels and section markers exactly. \
Reply with the prompt only.";

/// Asks for a rewrite that uses each listed word once.
pub fn condense_dedup_prompt(text: &str, repeated: &[String], max_chars: usize) -> String {
    format!(
        "These words are repeated: {}. Rewrite the prompt so each appears at most once, \
         using synonyms or dropping redundant phrases. Stay under {} characters.\n\n{}",
        repeated.join(", "),
        max_chars,
        text
    )
}

/// Asks for a rewrite within `target` characters.
pub fn condense_to_prompt(text: &str, target: usize) -> String {
    format!(
        "This prompt is {} characters long. Condense it to at most {} characters, \
         keeping the header and the Genre, BPM, Mood and Instruments fields.\n\n{}",
        text.chars().count(),
        target,
        text
    )
}

pub const TITLE_SYSTEM: &str = "You name songs. Reply with a title of two to five words \
and nothing else: no quotes, no punctuation at the end.";

pub fn title_prompt(description: &str, genre: &str, mood: &str) -> String {
    format!(
        "Song description: {}\nGenre: {}\nMood: {}\n\nTitle:",
        description.trim(),
        genre,
        mood
    )
}

pub const LYRICS_SYSTEM: &str = "You write song lyrics. Structure them with [Verse], \
[Chorus], [Verse], [Chorus], [Bridge] and [Chorus] markers. Reply with the lyrics only.";

pub fn lyrics_prompt(description: &str, genre: &str, mood: &str, locked_phrase: Option<&str>) -> String {
    let mut out = format!(
        "Song description: {}\nGenre: {}\nMood: {}\n",
        description.trim(),
        genre,
        mood
    );
    if let Some(phrase) = locked_phrase {
        out.push_str(&format!("Use this line in the chorus: {}\n", phrase));
    }
    out.push_str("\nLyrics:");
    out
}

/// Cleans a model-written title: first line, quotes and trailing
/// punctuation removed. `None` if nothing usable remains.
pub fn clean_title(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.strip_prefix("Title:").unwrap_or(line).trim();
    let cleaned = line
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '*')
        .trim_end_matches(['.', '!', '?'])
        .trim();
    if cleaned.is_empty() || cleaned.chars().count() > 80 {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunesmith_engine::{assemble, AssemblyOptions, SeededRandom};
    use tunesmith_spec::TraceCollector;

    #[test]
    fn test_generation_prompt_carries_context() {
        let request = GenerationRequest::builder("rainy night")
            .genre("jazz rock")
            .locked_phrase("Never let go")
            .build();
        let assembly = assemble(
            &request,
            &AssemblyOptions::default(),
            &mut SeededRandom::new(3),
            &mut TraceCollector::disabled(),
        );
        let prompt = generation_prompt(&request, &assembly);
        assert!(prompt.contains("Genre: Jazz Rock"));
        assert!(prompt.contains("Blend of: jazz, rock"));
        assert!(prompt.contains(&assembly.enrichment.bpm_range));
        assert!(prompt.contains("End with this exact line, unchanged: Never let go"));
    }

    #[test]
    fn test_max_system_prompt_names_header() {
        let system = generation_system(PromptMode::Max, 1000);
        assert!(system.contains("[Is_MAX_MODE: MAX](MAX)"));
        assert!(system.contains("1000"));
        assert!(generation_system(PromptMode::Standard, 1000).contains("Instruments:"));
    }

    #[test]
    fn test_dedup_prompt_names_words() {
        let prompt = condense_dedup_prompt("text", &["warm".into(), "lush".into()], 900);
        assert!(prompt.contains("warm, lush"));
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("\"Neon Rain.\"\n").as_deref(), Some("Neon Rain"));
        assert_eq!(clean_title("Title: Midnight Static").as_deref(), Some("Midnight Static"));
        assert_eq!(clean_title("  \n "), None);
    }
}
