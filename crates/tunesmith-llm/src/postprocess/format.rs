//! Header repair for model output.

use tunesmith_engine::MAX_MODE_HEADER;
use tunesmith_registry::defaults::{DEFAULT_GENRE, DEFAULT_MOOD};
use tunesmith_spec::PromptMode;

/// Result of [`validate_and_fix_format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFix {
    pub text: String,
    /// True if a header was synthesized.
    pub repaired: bool,
}

/// Ensures the text opens with a header.
///
/// Markdown fences are stripped first. In standard mode a missing bracket
/// header is synthesized as `[{Mood}, {Genre}]` from the `Genre:` and
/// `Mood:` lines, defaulting to "Cinematic" and "Evocative". In MAX mode
/// the fixed MAX header is prepended instead.
pub fn validate_and_fix_format(text: &str, mode: PromptMode) -> FormatFix {
    let text = strip_fences(text);
    if text.starts_with('[') {
        return FormatFix {
            text,
            repaired: false,
        };
    }
    let header = match mode {
        PromptMode::Standard => {
            let genre = field_value(&text, "genre").unwrap_or_else(|| DEFAULT_GENRE.to_string());
            let mood = field_value(&text, "mood")
                .and_then(|m| m.split(',').next().map(|s| s.trim().to_string()))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MOOD.to_string());
            format!("[{}, {}]\n\n", mood, genre)
        }
        PromptMode::Max => format!("{}\n", MAX_MODE_HEADER.join("\n")),
    };
    FormatFix {
        text: format!("{}{}", header, text),
        repaired: true,
    }
}

fn strip_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Value of the first `label:` line (case-insensitive), unquoted.
fn field_value(text: &str, label: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if !key.trim().eq_ignore_ascii_case(label) {
            return None;
        }
        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
