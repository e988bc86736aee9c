//! Leaked assistant chatter ("Here is your prompt:", "Note: ...").

/// Lowercase substrings that mark a line as leaked meta text.
pub const LEAKED_META_PATTERNS: &[&str] = &[
    "as an ai",
    "language model",
    "here is your",
    "here is the",
    "here's your",
    "here's the",
    "here's a ",
    "below is",
    "i hope this",
    "hope this helps",
    "let me know",
    "feel free to",
    "system prompt",
    "instructions:",
    "i cannot",
    "i can't",
    "sure,",
    "sure!",
    "certainly",
    "note:",
    "(note",
    "as requested",
    "character count",
    "characters long",
    "this prompt",
];

/// Scrubbed text shorter than this is discarded in favour of the original.
pub const MIN_SCRUBBED_CHARS: usize = 40;

fn is_leaked_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    LEAKED_META_PATTERNS.iter().any(|p| lower.contains(p))
}

/// True if any line carries a leaked-meta pattern.
pub fn has_leaked_meta(text: &str) -> bool {
    text.lines().any(is_leaked_line)
}

/// Drops every line that carries a leaked-meta pattern.
///
/// If the remainder would be shorter than [`MIN_SCRUBBED_CHARS`], the
/// original text is returned unchanged.
pub fn scrub_leaked_meta(text: &str) -> String {
    if !has_leaked_meta(text) {
        return text.to_string();
    }
    let kept: Vec<&str> = text.lines().filter(|line| !is_leaked_line(line)).collect();
    let scrubbed = kept.join("\n").trim().to_string();
    if scrubbed.chars().count() < MIN_SCRUBBED_CHARS {
        text.to_string()
    } else {
        scrubbed
    }
}
