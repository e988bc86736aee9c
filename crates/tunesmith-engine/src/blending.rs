//! Blending across one to four genre components.
//!
//! Multi-genre selections draw from merged pools rather than from per-genre
//! picks, so the primary genre gets no more weight than any other component.

use std::collections::HashSet;

use tracing::debug;
use tunesmith_registry::defaults::{DEFAULT_PRODUCTION, DEFAULT_VOCAL};
use tunesmith_registry::GenreDefinition;
use tunesmith_spec::TraceCollector;

use crate::rng::{pick, sample, shuffle, RandomSource};
use crate::selection::articulate;

/// Instruments each component contributes before shuffling.
pub const INSTRUMENTS_PER_COMPONENT: usize = 2;

/// Selects instruments across several genres.
///
/// Takes up to two instruments from each component (required pools first),
/// unions and deduplicates them, Fisher–Yates-shuffles, truncates to
/// `max_instruments` while keeping at least one instrument per component
/// when the cap allows, then articulates each survivor.
pub fn select_instruments_for_multi_genre(
    components: &[&GenreDefinition],
    max_instruments: usize,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<(usize, &'static str)> = Vec::new();

    for (index, genre) in components.iter().enumerate() {
        let required: Vec<&'static str> = genre
            .ordered_pools()
            .filter(|(_, p)| p.is_required())
            .flat_map(|(_, p)| p.instruments.iter().copied())
            .collect();
        let source = if required.is_empty() {
            genre.all_instruments()
        } else {
            required
        };

        let picks = sample(rng, &source, INSTRUMENTS_PER_COMPONENT);
        trace.selection(
            "instruments",
            &format!("blend.{}", genre.id),
            "per-genre representation",
            source.len(),
            &picks.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        );
        for instrument in picks {
            if seen.insert(instrument.to_lowercase()) {
                candidates.push((index, instrument));
            }
        }
    }

    shuffle(rng, &mut candidates);
    let kept = keep_representatives(candidates, max_instruments);

    let instruments: Vec<String> = kept
        .into_iter()
        .map(|(_, instrument)| articulate(instrument, rng))
        .collect();
    debug!(instruments = ?instruments, "blended instruments selected");
    instruments
}

/// Truncates to `limit`, first reserving a slot for each component's earliest
/// candidate. Relative order is preserved.
fn keep_representatives<T>(candidates: Vec<(usize, T)>, limit: usize) -> Vec<(usize, T)> {
    let mut keep = vec![false; candidates.len()];
    let mut kept = 0;

    let mut represented = HashSet::new();
    for (i, (component, _)) in candidates.iter().enumerate() {
        if kept >= limit {
            break;
        }
        if represented.insert(*component) {
            keep[i] = true;
            kept += 1;
        }
    }
    for slot in keep.iter_mut() {
        if kept >= limit {
            break;
        }
        if !*slot {
            *slot = true;
            kept += 1;
        }
    }

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect()
}

/// Union of a sub-pool across components, first-seen order.
fn merged_pool(
    components: &[&GenreDefinition],
    field: impl Fn(&GenreDefinition) -> &'static [&'static str],
) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    components
        .iter()
        .flat_map(|g| field(g).iter().copied())
        .filter(|item| seen.insert(*item))
        .collect()
}

/// Builds "{range}, {delivery}, {technique}".
///
/// One component draws from its own table, several draw from the merged
/// tables, none draws from the global default table.
pub fn build_vocal_descriptor(components: &[&GenreDefinition], rng: &mut dyn RandomSource) -> String {
    let (ranges, deliveries, techniques) = match components {
        [] => (
            DEFAULT_VOCAL.ranges.to_vec(),
            DEFAULT_VOCAL.deliveries.to_vec(),
            DEFAULT_VOCAL.techniques.to_vec(),
        ),
        [single] => (
            single.vocal.ranges.to_vec(),
            single.vocal.deliveries.to_vec(),
            single.vocal.techniques.to_vec(),
        ),
        many => (
            merged_pool(many, |g| g.vocal.ranges),
            merged_pool(many, |g| g.vocal.deliveries),
            merged_pool(many, |g| g.vocal.techniques),
        ),
    };
    join_picks(rng, &[&ranges, &deliveries, &techniques])
}

/// Builds "{texture}, {reverb}" with the same blending rules as
/// [`build_vocal_descriptor`].
pub fn build_production_descriptor(
    components: &[&GenreDefinition],
    rng: &mut dyn RandomSource,
) -> String {
    let (textures, reverbs) = match components {
        [] => (
            DEFAULT_PRODUCTION.textures.to_vec(),
            DEFAULT_PRODUCTION.reverbs.to_vec(),
        ),
        [single] => (
            single.production.textures.to_vec(),
            single.production.reverbs.to_vec(),
        ),
        many => (
            merged_pool(many, |g| g.production.textures),
            merged_pool(many, |g| g.production.reverbs),
        ),
    };
    join_picks(rng, &[&textures, &reverbs])
}

fn join_picks(rng: &mut dyn RandomSource, pools: &[&Vec<&'static str>]) -> String {
    pools
        .iter()
        .filter_map(|pool| pick(rng, pool).copied())
        .collect::<Vec<_>>()
        .join(", ")
}
