//! Per-generation data produced by the engine and consumed by formatters.

use serde::{Deserialize, Serialize};

/// Outcome of genre resolution for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGenre {
    /// Genre detected from the description by keyword, if any.
    pub detected: Option<String>,
    /// User-facing genre text. Preserves compound overrides ("jazz rock").
    pub display_genre: String,
    /// First component.
    pub primary_genre: String,
    /// One to four recognized genre ids.
    pub components: Vec<String>,
}

impl ResolvedGenre {
    /// Builds a single-component resolution.
    pub fn single(id: impl Into<String>, detected: bool) -> Self {
        let id = id.into();
        Self {
            detected: detected.then(|| id.clone()),
            display_genre: id.clone(),
            primary_genre: id.clone(),
            components: vec![id],
        }
    }

    /// Builds a multi-component resolution from an override.
    ///
    /// `components` must be non-empty.
    pub fn compound(display: impl Into<String>, components: Vec<String>) -> Self {
        let primary = components.first().cloned().unwrap_or_default();
        Self {
            detected: None,
            display_genre: display.into(),
            primary_genre: primary,
            components,
        }
    }

    /// Returns true when more than one genre is blended.
    pub fn is_blend(&self) -> bool {
        self.components.len() > 1
    }
}

/// Everything the formatter needs, assembled once per generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    /// Moods drawn from the genre mood lists.
    pub moods: Vec<String>,
    /// Selected instruments in output order.
    pub instruments: Vec<String>,
    /// Instruments joined for display.
    pub instruments_formatted: String,
    /// Vocal descriptor ("airy alto, breathy delivery, subtle vibrato").
    pub vocal_style: String,
    /// Production descriptor ("tape saturation, plate reverb").
    pub production: String,
    /// Deduplicated, lowercase, budget-capped style tags.
    pub style_tags: Vec<String>,
    /// Suggested chord progression.
    pub chord_progression: String,
    /// Human-readable BPM range ("between 90 and 140").
    pub bpm_range: String,
    /// Key and mode ("D minor").
    pub key: String,
}

/// Splits a genre override into lowercase candidate tokens.
///
/// Separators are whitespace, `-`, `/`, `&`, `,`, `+` and the word "and".
pub fn split_genre_override(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '/' | '&' | ',' | '+'))
        .filter(|t| !t.is_empty() && *t != "and")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_genre_override_separators() {
        assert_eq!(split_genre_override("Jazz Rock"), vec!["jazz", "rock"]);
        assert_eq!(
            split_genre_override("lofi/hiphop & soul and funk"),
            vec!["lofi", "hiphop", "soul", "funk"]
        );
        assert_eq!(split_genre_override("synth-pop"), vec!["synth", "pop"]);
        assert!(split_genre_override("  ").is_empty());
    }

    #[test]
    fn test_resolved_genre_constructors() {
        let single = ResolvedGenre::single("jazz", true);
        assert_eq!(single.detected.as_deref(), Some("jazz"));
        assert_eq!(single.components, vec!["jazz"]);
        assert!(!single.is_blend());

        let blend = ResolvedGenre::compound("jazz rock", vec!["jazz".into(), "rock".into()]);
        assert_eq!(blend.primary_genre, "jazz");
        assert_eq!(blend.detected, None);
        assert!(blend.is_blend());
    }
}
