//! Tempo range resolution with a three-level fallback.

use tunesmith_registry::defaults::DEFAULT_BPM_RANGE;
use tunesmith_registry::{genre, BpmRange};
use tunesmith_spec::split_genre_override;

/// A resolved tempo range and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpmResolution {
    /// "between {min} and {max}".
    pub range: String,
    pub source: BpmSource,
}

/// Which fallback level produced a [`BpmResolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BpmSource {
    /// Averaged over every component that defines a range.
    Blended,
    /// The primary genre's own range.
    Primary,
    /// The fixed default.
    Default,
}

impl BpmSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BpmSource::Blended => "blended",
            BpmSource::Primary => "primary",
            BpmSource::Default => "default",
        }
    }
}

/// Resolves a tempo range for one or more genre ids. Never fails.
///
/// With more than one component, min and max are averaged over the
/// components that define a range. Otherwise the primary genre's range is
/// used, and failing that the default "between 90 and 140".
pub fn resolve_bpm_range<S: AsRef<str>>(components: &[S]) -> BpmResolution {
    let ranges: Vec<BpmRange> = components
        .iter()
        .filter_map(|id| genre(id.as_ref()))
        .filter_map(|g| g.bpm)
        .collect();

    if components.len() > 1 && !ranges.is_empty() {
        let n = ranges.len() as u32;
        let avg = |sum: u32| ((sum + n / 2) / n) as u16;
        let min = avg(ranges.iter().map(|r| u32::from(r.min)).sum());
        let max = avg(ranges.iter().map(|r| u32::from(r.max)).sum());
        return BpmResolution {
            range: format!("between {} and {}", min, max),
            source: BpmSource::Blended,
        };
    }

    if let Some(range) = components
        .first()
        .and_then(|id| genre(id.as_ref()))
        .and_then(|g| g.bpm)
    {
        return BpmResolution {
            range: range.describe(),
            source: BpmSource::Primary,
        };
    }

    BpmResolution {
        range: DEFAULT_BPM_RANGE.to_string(),
        source: BpmSource::Default,
    }
}

/// Resolves a tempo range from free genre text such as "jazz rock".
pub fn bpm_range_for_genre(genre_text: &str) -> String {
    let components: Vec<String> = split_genre_override(genre_text)
        .into_iter()
        .filter(|token| genre(token).is_some())
        .collect();
    resolve_bpm_range(&components).range
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_genre_uses_its_range() {
        let resolved = resolve_bpm_range(&["jazz"]);
        assert_eq!(resolved.range, "between 80 and 180");
        assert_eq!(resolved.source, BpmSource::Primary);
    }

    #[test]
    fn test_blend_averages_ranges() {
        let resolved = resolve_bpm_range(&["jazz", "lofi"]);
        assert_eq!(resolved.range, "between 75 and 135");
        assert_eq!(resolved.source, BpmSource::Blended);
    }

    #[test]
    fn test_blend_skips_components_without_range() {
        let resolved = resolve_bpm_range(&["cinematic", "jazz"]);
        assert_eq!(resolved.range, "between 80 and 180");
        assert_eq!(resolved.source, BpmSource::Blended);
    }

    #[test]
    fn test_default_when_nothing_defines_a_range() {
        let resolved = resolve_bpm_range(&["cinematic"]);
        assert_eq!(resolved.range, "between 90 and 140");
        assert_eq!(resolved.source, BpmSource::Default);

        let empty: [&str; 0] = [];
        assert_eq!(resolve_bpm_range(&empty).source, BpmSource::Default);
        assert_eq!(resolve_bpm_range(&["nope"]).range, DEFAULT_BPM_RANGE);
    }

    #[test]
    fn test_genre_text_is_split() {
        assert_eq!(bpm_range_for_genre("Jazz / Lofi"), "between 75 and 135");
        assert_eq!(bpm_range_for_genre("polka"), "between 90 and 140");
    }
}
