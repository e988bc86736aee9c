//! Genre resolution: override, then keyword detection, then a seeded pick.

use tracing::{debug, warn};
use tunesmith_registry::{is_known, GenreDefinition, MoodCategory, GENRES, MOOD_CATEGORIES};
use tunesmith_spec::{split_genre_override, ResolvedGenre, TraceCollector, MAX_GENRE_COMPONENTS};

use crate::rng::RandomSource;

/// Resolves a description and optional override to one or more genres.
///
/// Never fails. An override that matches no genre id is logged and ignored.
pub fn resolve_genre(
    description: &str,
    genre_override: Option<&str>,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> ResolvedGenre {
    if let Some(raw) = genre_override.map(str::trim).filter(|s| !s.is_empty()) {
        let components = override_components(raw);
        if !components.is_empty() {
            let display_genre = raw.to_lowercase();
            debug!(display = %display_genre, components = ?components, "genre from override");
            trace.decision(
                "genre",
                "resolve",
                "override",
                format!("override '{}' matched {}", display_genre, components.join(", ")),
            );
            return ResolvedGenre::compound(display_genre, components);
        }
        warn!(genre_override = raw, "genre override matched no known genre; ignoring");
        trace.decision(
            "genre",
            "override",
            "ignored",
            format!("'{}' matched no known genre", raw),
        );
    }

    if let Some((genre, keyword)) = detect_genre(description) {
        debug!(genre = genre.id, keyword, "genre detected from description");
        trace.decision(
            "genre",
            "resolve",
            "detected",
            format!("keyword '{}' in description", keyword),
        );
        return ResolvedGenre::single(genre.id, true);
    }

    let genre = &GENRES[rng.index(GENRES.len())];
    debug!(genre = genre.id, "no genre keyword; picked at random");
    trace.decision(
        "genre",
        "resolve",
        "random",
        format!("no keyword matched; drew '{}'", genre.id),
    );
    ResolvedGenre::single(genre.id, false)
}

/// Override tokens that name known genres, deduplicated in order and capped
/// at the blend limit.
fn override_components(raw: &str) -> Vec<String> {
    let mut components: Vec<String> = Vec::new();
    for token in split_genre_override(raw) {
        if is_known(&token) && !components.contains(&token) {
            components.push(token);
        }
    }
    components.truncate(MAX_GENRE_COMPONENTS);
    components
}

/// Detects a genre by keyword.
///
/// The description is split on commas; each segment is tried in order, then
/// the whole string. Within a segment, genres are tried in registry order and
/// the first keyword hit wins.
pub fn detect_genre(description: &str) -> Option<(&'static GenreDefinition, &'static str)> {
    let lower = description.to_lowercase();
    lower
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .chain(std::iter::once(lower.as_str()))
        .find_map(detect_in)
}

fn detect_in(text: &str) -> Option<(&'static GenreDefinition, &'static str)> {
    GENRES.iter().find_map(|genre| {
        genre
            .keywords
            .iter()
            .find(|keyword| contains_word(text, keyword))
            .map(|keyword| (genre, *keyword))
    })
}

/// Detects a mood category from trigger words in the description.
pub fn detect_mood_category(description: &str) -> Option<&'static MoodCategory> {
    let lower = description.to_lowercase();
    MOOD_CATEGORIES
        .iter()
        .find(|category| category.keywords.iter().any(|k| contains_word(&lower, k)))
}

/// True if `needle` occurs in `haystack` bounded by non-alphanumeric
/// characters or the ends of the string.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        before.map_or(true, |c| !c.is_alphanumeric()) && after.map_or(true, |c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SeededRandom, SequenceRandom};
    use pretty_assertions::assert_eq;

    fn trace() -> TraceCollector {
        TraceCollector::default()
    }

    #[test]
    fn test_keyword_detection() {
        let mut rng = SeededRandom::new(1);
        let resolved = resolve_genre("smooth jazz night session", None, &mut rng, &mut trace());
        assert_eq!(resolved.detected.as_deref(), Some("jazz"));
        assert_eq!(resolved.components, vec!["jazz"]);
        assert_eq!(resolved.primary_genre, "jazz");
    }

    #[test]
    fn test_compound_override() {
        let mut rng = SeededRandom::new(1);
        let resolved = resolve_genre("random words", Some("jazz rock"), &mut rng, &mut trace());
        assert_eq!(resolved.components, vec!["jazz", "rock"]);
        assert_eq!(resolved.display_genre, "jazz rock");
        assert_eq!(resolved.primary_genre, "jazz");
        assert_eq!(resolved.detected, None);
    }

    #[test]
    fn test_override_display_is_lowercased_and_trimmed() {
        let mut rng = SeededRandom::new(1);
        let resolved = resolve_genre("", Some("  Lofi/HipHop "), &mut rng, &mut trace());
        assert_eq!(resolved.display_genre, "lofi/hiphop");
        assert_eq!(resolved.components, vec!["lofi", "hiphop"]);
    }

    #[test]
    fn test_unknown_override_falls_through_to_detection() {
        let mut rng = SeededRandom::new(1);
        let mut trace = trace();
        let resolved = resolve_genre(
            "dusty blues in a small bar",
            Some("nonexistentgenre"),
            &mut rng,
            &mut trace,
        );
        assert_eq!(resolved.components, vec!["blues"]);
        assert_eq!(resolved.detected.as_deref(), Some("blues"));
        assert!(trace.events().iter().any(|e| matches!(
            e,
            tunesmith_spec::TraceEvent::Decision(d) if d.branch_taken == "ignored"
        )));
    }

    #[test]
    fn test_unknown_override_and_no_keyword_picks_randomly() {
        let mut rng = SequenceRandom::constant(0.0);
        let resolved = resolve_genre("something", Some("nonexistentgenre"), &mut rng, &mut trace());
        assert_eq!(resolved.components, vec![GENRES[0].id]);
        assert_eq!(resolved.detected, None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_random_pick_is_seeded() {
        let a = resolve_genre("xyz", None, &mut SeededRandom::new(9), &mut trace());
        let b = resolve_genre("xyz", None, &mut SeededRandom::new(9), &mut trace());
        assert_eq!(a, b);
    }

    #[test]
    fn test_segments_are_tried_before_whole_string() {
        // The first segment wins even though lofi precedes jazz in the registry.
        let (genre, _) = detect_genre("jazz, lo-fi beats").unwrap();
        assert_eq!(genre.id, "jazz");
        let (genre, keyword) = detect_genre("Rainy night, HIP HOP vibe").unwrap();
        assert_eq!(genre.id, "hiphop");
        assert_eq!(keyword, "hip hop");
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        assert!(contains_word("smooth jazz night", "jazz"));
        assert!(contains_word("r&b slow jam", "r&b"));
        assert!(!contains_word("jazzy", "jazz"));
        assert!(!contains_word("rockets", "rock"));
        assert!(detect_genre("grapefruit popsicle").is_none());
    }

    #[test]
    fn test_duplicate_override_tokens_collapse() {
        assert_eq!(override_components("rock and rock, jazz"), vec!["rock", "jazz"]);
        assert_eq!(
            override_components("jazz rock funk soul blues"),
            vec!["jazz", "rock", "funk", "soul"]
        );
    }

    #[test]
    fn test_mood_category_detection() {
        assert_eq!(detect_mood_category("a sad rainy afternoon").map(|c| c.name), Some("melancholic"));
        assert_eq!(detect_mood_category("plain words"), None);
    }
}
