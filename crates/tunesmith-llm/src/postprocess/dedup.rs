//! Repeated-word detection.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Words shorter than this are never counted.
pub const MIN_WORD_CHARS: usize = 4;

/// A condense call is issued when more than this many distinct words repeat.
pub const DEDUP_TRIGGER: usize = 3;

/// Format labels and section names, which repeat by construction.
const IGNORED_WORDS: &[&str] = &[
    "genre", "mood", "moods", "instruments", "style", "tags", "recording", "intro", "verse",
    "chorus", "bridge", "outro", "vocals", "chords", "quality", "realism", "with", "between",
];

const WORD_PATTERN: &str = r"[\p{L}\p{N}']+";

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(WORD_PATTERN).expect("invalid regex pattern"))
}

/// Lowercased words of at least [`MIN_WORD_CHARS`] characters that occur
/// more than once, in order of first occurrence.
pub fn find_repeated_words(text: &str) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for m in word_regex().find_iter(text) {
        let word = m.as_str().trim_matches('\'').to_lowercase();
        if word.chars().count() < MIN_WORD_CHARS || IGNORED_WORDS.contains(&word.as_str()) {
            continue;
        }
        let count = counts.entry(word.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(word);
        }
    }
    order
}

/// True when enough distinct words repeat to warrant a condense call.
pub fn needs_dedup(repeated: &[String]) -> bool {
    repeated.len() > DEDUP_TRIGGER
}
