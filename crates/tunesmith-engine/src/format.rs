//! Prompt serialization and character-budget truncation.
//!
//! Two wire formats are supported:
//!
//! MAX mode
//! ```text
//! [Is_MAX_MODE: MAX](MAX)
//! [QUALITY: MAX](MAX)
//! [REALISM: MAX](MAX)
//! genre: "jazz rock"
//! bpm: "between 90 and 140"
//! instruments: "..."
//! style tags: "..."
//! recording: "..."
//! ```
//!
//! Standard mode
//! ```text
//! [Smoky, Jazz, Key: D Dorian]
//!
//! Genre: Jazz
//! BPM: between 80 and 180
//! Mood: smoky, nocturnal
//! Instruments: ...
//!
//! [INTRO]
//! ...
//! ```
//!
//! All lengths are counted in characters, not bytes.

/// The fixed MAX mode header.
pub const MAX_MODE_HEADER: [&str; 3] = [
    "[Is_MAX_MODE: MAX](MAX)",
    "[QUALITY: MAX](MAX)",
    "[REALISM: MAX](MAX)",
];

/// A truncation breakpoint is only used past this fraction of the budget.
pub const BREAKPOINT_RATIO: f64 = 0.8;

/// Fields shared by both formats.
#[derive(Debug, Clone, Copy)]
pub struct PromptFields<'a> {
    /// Display genre ("Jazz Rock").
    pub genre: &'a str,
    /// Header mood ("Smoky").
    pub mood: &'a str,
    pub moods: &'a [String],
    pub key: &'a str,
    pub bpm: &'a str,
    pub instruments: &'a [String],
    pub style_tags: &'a [String],
    pub recording: &'a str,
    /// Rendered section blocks (standard mode only).
    pub sections: &'a str,
    /// Adds `Style Tags:` and `Recording:` in standard mode.
    pub use_suno_tags: bool,
}

/// Serializes in MAX mode.
pub fn format_max(fields: &PromptFields<'_>) -> String {
    let mut lines: Vec<String> = MAX_MODE_HEADER.iter().map(|s| s.to_string()).collect();
    lines.push(quoted("genre", &fields.genre.to_lowercase()));
    lines.push(quoted("bpm", fields.bpm));
    lines.push(quoted("instruments", &fields.instruments.join(", ")));
    lines.push(quoted("style tags", &fields.style_tags.join(", ")));
    lines.push(quoted("recording", fields.recording));
    lines.join("\n")
}

fn quoted(key: &str, value: &str) -> String {
    format!("{}: \"{}\"", key, value.replace('"', "'"))
}

/// Serializes in standard mode.
pub fn format_standard(fields: &PromptFields<'_>) -> String {
    let mut out = format!("[{}, {}, Key: {}]\n\n", fields.mood, fields.genre, fields.key);
    out.push_str(&format!("Genre: {}\n", fields.genre));
    out.push_str(&format!("BPM: {}\n", fields.bpm));
    out.push_str(&format!("Mood: {}\n", fields.moods.join(", ")));
    out.push_str(&format!("Instruments: {}", fields.instruments.join(", ")));
    if fields.use_suno_tags {
        out.push_str(&format!("\nStyle Tags: {}", fields.style_tags.join(", ")));
        out.push_str(&format!("\nRecording: {}", fields.recording));
    }
    if !fields.sections.is_empty() {
        out.push_str("\n\n");
        out.push_str(fields.sections);
    }
    out
}

/// Truncates `text` to at most `max_len` characters.
///
/// Text already within budget is returned unchanged. Otherwise the text is
/// cut to `max_len` characters; if the last newline or closing quote in that
/// slice lies past 80% of the budget, the cut moves back to it so the last
/// field stays whole. A quote is kept, a newline is dropped.
pub fn truncate_prompt(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let slice: String = text.chars().take(max_len).collect();
    let threshold = (max_len as f64 * BREAKPOINT_RATIO) as usize;

    let breakpoint = slice
        .chars()
        .enumerate()
        .filter(|(_, c)| *c == '\n' || *c == '"')
        .last();

    match breakpoint {
        Some((index, c)) if index > threshold => {
            let keep = if c == '"' { index + 1 } else { index };
            slice.chars().take(keep).collect()
        }
        _ => slice,
    }
}

/// Fits `body` plus an optional locked phrase into `max_len` characters.
///
/// The phrase is appended verbatim as the last line and the body is
/// truncated around it, so the phrase itself is never cut unless it alone
/// exceeds the budget.
pub fn fit_with_locked_phrase(body: &str, locked_phrase: Option<&str>, max_len: usize) -> String {
    let Some(phrase) = locked_phrase.map(str::trim).filter(|p| !p.is_empty()) else {
        return truncate_prompt(body, max_len);
    };
    let reserved = phrase.chars().count() + 1;
    if reserved >= max_len {
        return truncate_prompt(phrase, max_len);
    }
    let body = truncate_prompt(body, max_len - reserved);
    let body = body.trim_end();
    if body.is_empty() {
        phrase.to_string()
    } else {
        format!("{}\n{}", body, phrase)
    }
}

/// Capitalizes each whitespace-separated word ("jazz rock" to "Jazz Rock").
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(crate::sections::capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn with_fields<R>(use_suno_tags: bool, f: impl FnOnce(&PromptFields<'_>) -> R) -> R {
        let moods = strings(&["smoky", "nocturnal"]);
        let instruments = strings(&["upright bass", "piano"]);
        let tags = strings(&["smoky", "live room recording"]);
        let fields = PromptFields {
            genre: "Jazz",
            mood: "Smoky",
            moods: &moods,
            key: "D Dorian",
            bpm: "between 80 and 180",
            instruments: &instruments,
            style_tags: &tags,
            recording: "live studio session",
            sections: "[INTRO]\nPiano alone",
            use_suno_tags,
        };
        f(&fields)
    }

    #[test]
    fn test_max_mode_layout() {
        let text = with_fields(false, format_max);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[..3], &MAX_MODE_HEADER[..]);
        assert_eq!(lines[3], "genre: \"jazz\"");
        assert_eq!(lines[4], "bpm: \"between 80 and 180\"");
        assert_eq!(lines[5], "instruments: \"upright bass, piano\"");
        assert_eq!(lines[6], "style tags: \"smoky, live room recording\"");
        assert_eq!(lines[7], "recording: \"live studio session\"");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_standard_mode_layout() {
        let text = with_fields(false, format_standard);
        assert_eq!(
            text,
            "[Smoky, Jazz, Key: D Dorian]\n\nGenre: Jazz\nBPM: between 80 and 180\nMood: smoky, nocturnal\nInstruments: upright bass, piano\n\n[INTRO]\nPiano alone"
        );
    }

    #[test]
    fn test_standard_mode_with_suno_tags() {
        let text = with_fields(true, format_standard);
        assert!(text.contains("\nStyle Tags: smoky, live room recording\nRecording: live studio session\n\n[INTRO]"));
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_prompt("short text", 100), "short text");
    }

    #[test]
    fn test_truncate_cuts_at_late_newline() {
        let text = format!("{}\n{}", "a".repeat(90), "b".repeat(50));
        let cut = truncate_prompt(&text, 100);
        assert_eq!(cut, "a".repeat(90));
    }

    #[test]
    fn test_truncate_keeps_closing_quote() {
        let text = format!("k: \"{}\"\nnext: \"{}\"", "a".repeat(85), "b".repeat(40));
        let cut = truncate_prompt(&text, 100);
        assert!(cut.ends_with('"'));
        assert!(cut.chars().count() <= 100);
    }

    #[test]
    fn test_truncate_ignores_early_breakpoint() {
        let text = format!("{}\n{}", "a".repeat(10), "b".repeat(200));
        let cut = truncate_prompt(&text, 100);
        assert_eq!(cut.chars().count(), 100);
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "é".repeat(50);
        assert_eq!(truncate_prompt(&text, 50), text);
        assert_eq!(truncate_prompt(&text, 10).chars().count(), 10);
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let text = format!("{}\n{}", "x".repeat(95), "y".repeat(30));
        let once = truncate_prompt(&text, 100);
        assert_eq!(truncate_prompt(&once, 100), once);
    }

    #[test]
    fn test_locked_phrase_survives_truncation() {
        let body = "z".repeat(500);
        let fitted = fit_with_locked_phrase(&body, Some("keep me"), 100);
        assert!(fitted.ends_with("\nkeep me"));
        assert!(fitted.chars().count() <= 100);
    }

    #[test]
    fn test_locked_phrase_absent_or_blank() {
        assert_eq!(fit_with_locked_phrase("body", None, 100), "body");
        assert_eq!(fit_with_locked_phrase("body", Some("  "), 100), "body");
        assert_eq!(fit_with_locked_phrase("body", Some("end"), 100), "body\nend");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jazz rock"), "Jazz Rock");
        assert_eq!(title_case("lofi/hiphop"), "Lofi/hiphop");
    }
}
