//! Weighted instrument pool sampling for a single genre.

use tracing::debug;
use tunesmith_registry::{articulations_for, GenreDefinition};
use tunesmith_spec::TraceCollector;

use crate::rng::{pick, sample, RandomSource};
use crate::unique::UniqueList;

/// Probability that an instrument gets a performance adjective.
pub const ARTICULATION_CHANCE: f64 = 0.5;

/// Options for [`select_instruments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Cap on the returned list.
    pub max_tags: usize,
    /// Whether optional pools may contribute.
    pub allow_optional: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            max_tags: 6,
            allow_optional: true,
        }
    }
}

/// Selects instruments for one genre.
///
/// Required pools are visited first in pool order, each contributing
/// `pick_min` instruments. Then, if allowed, each optional pool is included
/// by a Bernoulli trial against its inclusion chance and contributes one
/// instrument. The list is deduplicated case-insensitively in first-seen
/// order and capped to `max_tags`.
pub fn select_instruments(
    genre: &GenreDefinition,
    options: SelectionOptions,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> Vec<String> {
    let mut selected = UniqueList::new();

    for (pool_id, pool) in genre.ordered_pools().filter(|(_, p)| p.is_required()) {
        let picks = sample(rng, pool.instruments, usize::from(pool.pick_min));
        let chosen: Vec<String> = picks.iter().map(|s| s.to_string()).collect();
        trace.selection(
            "instruments",
            &format!("pool.{}", pool_id),
            format!("required pool of {}", genre.id),
            pool.instruments.len(),
            &chosen,
        );
        selected.extend(chosen);
    }

    if options.allow_optional {
        for (pool_id, pool) in genre.ordered_pools().filter(|(_, p)| !p.is_required()) {
            let chance = pool.inclusion_chance();
            if !rng.chance(chance) {
                trace.decision(
                    "instruments",
                    &format!("pool.{}", pool_id),
                    "skipped",
                    format!("optional pool lost its {:.2} draw", chance),
                );
                continue;
            }
            if let Some(instrument) = pick(rng, pool.instruments) {
                let chosen = vec![instrument.to_string()];
                trace.selection(
                    "instruments",
                    &format!("pool.{}", pool_id),
                    format!("optional pool won its {:.2} draw", chance),
                    pool.instruments.len(),
                    &chosen,
                );
                selected.extend(chosen);
            }
        }
    }

    let mut instruments = selected.into_vec();
    if instruments.len() > options.max_tags {
        trace.decision(
            "instruments",
            "cap",
            "truncated",
            format!("{} instruments capped to {}", instruments.len(), options.max_tags),
        );
        instruments.truncate(options.max_tags);
    }
    debug!(genre = genre.id, instruments = ?instruments, "instruments selected");
    instruments
}

/// Prefixes an instrument with a performance adjective, gated by
/// [`ARTICULATION_CHANCE`].
pub fn articulate(instrument: &str, rng: &mut dyn RandomSource) -> String {
    if !rng.chance(ARTICULATION_CHANCE) {
        return instrument.to_string();
    }
    match pick(rng, articulations_for(instrument)) {
        Some(adjective) if !instrument.to_lowercase().contains(adjective) => {
            format!("{} {}", adjective, instrument)
        }
        _ => instrument.to_string(),
    }
}
