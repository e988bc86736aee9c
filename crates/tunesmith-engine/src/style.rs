//! Style tag assembly under a tag budget.

use tracing::debug;
use tunesmith_registry::tags::{electronic_tags, is_electronic, realism_tags, GENERIC_TAGS};
use tunesmith_registry::GenreDefinition;
use tunesmith_spec::TraceCollector;

use crate::blending::build_production_descriptor;
use crate::rng::{sample, RandomSource};
use crate::unique::UniqueList;

/// Tag budget for the deterministic path.
pub const LEAN_TAG_BUDGET: usize = 6;

/// Tag budget when the tags feed an LLM.
pub const ENRICHED_TAG_BUDGET: usize = 15;

/// Moods drawn from each component's mood list.
pub const MOODS_PER_COMPONENT: usize = 2;

/// Realism or electronic tags drawn for the primary genre.
pub const TEXTURE_TAG_COUNT: usize = 3;

/// Result of [`assemble_style_tags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTags {
    /// Lowercase, deduplicated, capped to the budget.
    pub tags: Vec<String>,
    /// The mood tags drawn in step one, before capping.
    pub moods: Vec<String>,
    /// Production descriptor the production tags came from.
    pub production: String,
    /// `tags` joined with ", ".
    pub formatted: String,
}

/// Assembles style tags for one or more genre components.
///
/// Tags accumulate in category order (moods, then realism or electronic
/// texture tags for the primary genre, then production parts) and the list
/// is capped to `budget` at the end, so later categories are the first to be
/// dropped. Every random draw happens before the cap, which keeps the draw
/// sequence independent of the budget.
pub fn assemble_style_tags(
    components: &[&GenreDefinition],
    budget: usize,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> StyleTags {
    let mut tags = UniqueList::new();

    let mut moods = UniqueList::new();
    for genre in components {
        for mood in sample(rng, genre.moods, MOODS_PER_COMPONENT) {
            moods.insert(mood.to_lowercase());
        }
    }
    tags.extend(moods.as_slice().iter().cloned());

    let texture_pool = texture_tags_for(components.first().map(|g| g.id));
    let textures = sample(rng, texture_pool, TEXTURE_TAG_COUNT);
    tags.extend(textures.iter().map(|t| t.to_lowercase()));

    let production = build_production_descriptor(components, rng);
    tags.extend(
        production
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase),
    );

    let mut tags = tags.into_vec();
    if tags.len() > budget {
        trace.decision(
            "style",
            "tag_budget",
            "truncated",
            format!("{} tags capped to {}", tags.len(), budget),
        );
        tags.truncate(budget);
    }
    trace.selection("style", "tags", "mood, texture and production tags", tags.len(), &tags);
    debug!(tags = ?tags, "style tags assembled");

    StyleTags {
        formatted: tags.join(", "),
        tags,
        moods: moods.into_vec(),
        production,
    }
}

/// The texture table for a primary genre: electronic tags for electronic
/// genres, realism tags otherwise, generic tags when the matching table is
/// empty.
fn texture_tags_for(primary: Option<&str>) -> &'static [&'static str] {
    let Some(id) = primary else {
        return GENERIC_TAGS;
    };
    let table = if is_electronic(id) {
        electronic_tags(id)
    } else {
        realism_tags(id)
    };
    if table.is_empty() {
        GENERIC_TAGS
    } else {
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use tunesmith_registry::{genre, GENRES};

    fn defs(ids: &[&str]) -> Vec<&'static GenreDefinition> {
        ids.iter().map(|id| genre(id).unwrap()).collect()
    }

    #[test]
    fn test_tags_respect_budget() {
        for budget in [0, 1, LEAN_TAG_BUDGET, ENRICHED_TAG_BUDGET] {
            for g in GENRES {
                let mut rng = SeededRandom::new(3);
                let style = assemble_style_tags(&[g], budget, &mut rng, &mut TraceCollector::disabled());
                assert!(style.tags.len() <= budget, "{} over budget {}", g.id, budget);
            }
        }
    }

    #[test]
    fn test_tags_are_lowercase_and_unique() {
        let components = defs(&["jazz", "soul", "rnb", "funk"]);
        let mut rng = SeededRandom::new(17);
        let style =
            assemble_style_tags(&components, ENRICHED_TAG_BUDGET, &mut rng, &mut TraceCollector::disabled());
        let mut seen = std::collections::HashSet::new();
        for tag in &style.tags {
            assert_eq!(tag, &tag.to_lowercase());
            assert!(seen.insert(tag.clone()), "duplicate tag {}", tag);
        }
        assert_eq!(style.formatted, style.tags.join(", "));
    }

    #[test]
    fn test_moods_come_first() {
        let jazz = defs(&["jazz"]);
        let mut rng = SeededRandom::new(4);
        let style = assemble_style_tags(&jazz, LEAN_TAG_BUDGET, &mut rng, &mut TraceCollector::disabled());
        assert_eq!(style.moods.len(), MOODS_PER_COMPONENT);
        assert_eq!(&style.tags[..2], style.moods.as_slice());
    }

    #[test]
    fn test_draws_do_not_depend_on_budget() {
        let components = defs(&["lofi", "hiphop"]);
        let lean = assemble_style_tags(
            &components,
            LEAN_TAG_BUDGET,
            &mut SeededRandom::new(8),
            &mut TraceCollector::disabled(),
        );
        let rich = assemble_style_tags(
            &components,
            ENRICHED_TAG_BUDGET,
            &mut SeededRandom::new(8),
            &mut TraceCollector::disabled(),
        );
        assert_eq!(lean.tags.as_slice(), &rich.tags[..lean.tags.len()]);
        assert_eq!(lean.production, rich.production);
    }

    #[test]
    fn test_texture_table_selection() {
        assert_eq!(texture_tags_for(Some("techno")), electronic_tags("techno"));
        assert_eq!(texture_tags_for(Some("jazz")), realism_tags("jazz"));
        assert_eq!(texture_tags_for(None), GENERIC_TAGS);
    }

    #[test]
    fn test_production_parts_become_tags() {
        let rock = defs(&["rock"]);
        let style = assemble_style_tags(
            &rock,
            ENRICHED_TAG_BUDGET,
            &mut SeededRandom::new(2),
            &mut TraceCollector::disabled(),
        );
        for part in style.production.split(", ") {
            assert!(style.tags.contains(&part.to_lowercase()), "{} missing", part);
        }
    }
}
