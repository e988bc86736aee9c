//! Tunesmith Registry
//!
//! Immutable tables the generation engine draws from: genre definitions with
//! their instrument pools, moods, tempo ranges and vocal/production tables,
//! plus mood categories, style tags, harmony, articulations, section phrase
//! templates and title vocabulary.
//!
//! All data is `'static` and never mutates, so it can be shared freely across
//! concurrent generation calls.
//!
//! # Example
//!
//! ```
//! use tunesmith_registry::{genre, DEFAULT_OPTIONAL_CHANCE};
//!
//! let jazz = genre("jazz").unwrap();
//! assert_eq!(jazz.name, "Jazz");
//! let required: Vec<_> = jazz.ordered_pools().filter(|(_, p)| p.is_required()).collect();
//! assert!(!required.is_empty());
//! assert!(DEFAULT_OPTIONAL_CHANCE < 0.5);
//! ```

pub mod articulation;
pub mod defaults;
pub mod genres;
pub mod harmony;
pub mod moods;
pub mod phrases;
pub mod tags;
pub mod types;

pub use articulation::articulations_for;
pub use genres::{genre, genre_ids, is_known, GENRES};
pub use moods::{MoodCategory, MOOD_CATEGORIES};
pub use phrases::{section_templates, SectionTemplates};
pub use types::{
    BpmRange, GenreDefinition, GenreFamily, InstrumentPool, ProductionStyleTable,
    VocalStyleTable, DEFAULT_OPTIONAL_CHANCE,
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_genre_ids_are_unique_single_tokens() {
        let mut seen = HashSet::new();
        for g in GENRES {
            assert!(seen.insert(g.id), "duplicate genre id {}", g.id);
            assert!(
                g.id.chars().all(|c| c.is_ascii_lowercase()),
                "genre id '{}' must be a lowercase token",
                g.id
            );
        }
    }

    #[test]
    fn test_pool_order_is_unique_and_resolves() {
        for g in GENRES {
            let mut seen = HashSet::new();
            for id in g.pool_order {
                assert!(seen.insert(*id), "{}: duplicate pool id {}", g.id, id);
                assert!(g.pool(id).is_some(), "{}: pool {} does not resolve", g.id, id);
            }
            assert_eq!(g.ordered_pools().count(), g.pool_order.len());
        }
    }

    #[test]
    fn test_every_genre_has_a_required_pool() {
        for g in GENRES {
            assert!(
                g.ordered_pools()
                    .any(|(_, p)| p.is_required() && !p.instruments.is_empty()),
                "{} has no non-empty required pool",
                g.id
            );
        }
    }

    #[test]
    fn test_tables_are_populated() {
        for g in GENRES {
            assert!(g.moods.len() >= 2, "{} needs at least two moods", g.id);
            assert!(!g.keywords.is_empty(), "{} has no keywords", g.id);
            assert!(g.keywords.iter().all(|k| *k == k.to_lowercase()));
            assert!(!g.vocal.ranges.is_empty());
            assert!(!g.vocal.deliveries.is_empty());
            assert!(!g.vocal.techniques.is_empty());
            assert!(!g.production.textures.is_empty());
            assert!(!g.production.reverbs.is_empty());
        }
    }

    #[test]
    fn test_required_pick_counts_fit_pools() {
        for g in GENRES {
            for (id, pool) in g.ordered_pools() {
                assert!(
                    usize::from(pool.pick_min) <= pool.instruments.len(),
                    "{}: pool {} picks more than it holds",
                    g.id,
                    id
                );
            }
        }
    }

    #[test]
    fn test_bpm_ranges_are_ordered() {
        for g in GENRES {
            if let Some(bpm) = g.bpm {
                assert!(bpm.min <= bpm.typical && bpm.typical <= bpm.max, "{}", g.id);
            }
        }
    }

    #[test]
    fn test_optional_chances_are_probabilities() {
        for g in GENRES {
            for (_, pool) in g.ordered_pools() {
                let chance = pool.inclusion_chance();
                assert!((0.0..=1.0).contains(&chance));
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(genre("JAZZ").map(|g| g.id), Some("jazz"));
        assert!(is_known("rock"));
        assert!(!is_known("nonexistentgenre"));
        assert_eq!(genre_ids().len(), GENRES.len());
    }

    #[test]
    fn test_occasional_pool_uses_default_chance() {
        let jazz = genre("jazz").unwrap();
        let color = jazz.pool("color").unwrap();
        assert!(!color.is_required());
        assert_eq!(color.inclusion_chance(), DEFAULT_OPTIONAL_CHANCE);
    }

    #[test]
    fn test_tag_tables_reference_known_genres() {
        for (id, tags) in tags::REALISM_TAGS.iter().chain(tags::ELECTRONIC_TAGS) {
            assert!(is_known(id), "tag table for unknown genre {}", id);
            assert!(tags.len() >= 3);
        }
        for id in tags::ELECTRONIC_GENRES {
            assert!(is_known(id));
            assert!(tags::realism_tags(id).is_empty(), "{} is electronic", id);
        }
        assert!(tags::GENERIC_TAGS.len() >= 3);
    }

    #[test]
    fn test_articulation_lookup() {
        assert!(articulations_for("Upright Bass").contains(&"walking"));
        assert!(articulations_for("tenor saxophone").contains(&"breathy"));
        assert_eq!(
            articulations_for("theremin"),
            articulation::GENERIC_ARTICULATIONS
        );
    }

    #[test]
    fn test_progression_fallback() {
        for g in GENRES {
            assert!(!harmony::progressions_for(g.family).is_empty());
        }
        assert_eq!(harmony::modes_for("metal"), harmony::MINOR_LEANING_MODES);
        assert_eq!(harmony::modes_for("pop"), harmony::MAJOR_LEANING_MODES);
    }

    #[test]
    fn test_section_templates_are_populated() {
        for g in GENRES {
            let t = section_templates(g.family);
            for set in [t.intro, t.verse, t.chorus, t.bridge, t.outro] {
                assert!(!set.is_empty());
                assert!(set.iter().all(|p| p.contains("{inst")));
            }
        }
    }
}
