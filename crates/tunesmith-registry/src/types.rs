//! Table record types.

use serde::Serialize;

/// Inclusion probability for an optional pool that does not set its own.
pub const DEFAULT_OPTIONAL_CHANCE: f64 = 0.15;

/// Broad genre family, used to key harmony and section tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreFamily {
    Jazz,
    Blues,
    Rock,
    Pop,
    Soul,
    Folk,
    Urban,
    Electronic,
    Ambient,
    Orchestral,
    Latin,
}

/// A named group of instruments with an inclusion policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPool {
    pub instruments: &'static [&'static str],
    /// Instruments a required pool always contributes. Zero marks the pool
    /// optional.
    pub pick_min: u8,
    /// Inclusion probability when not required.
    pub chance_to_include: Option<f64>,
}

impl InstrumentPool {
    /// A pool that always contributes `pick_min` instruments.
    pub const fn required(instruments: &'static [&'static str], pick_min: u8) -> Self {
        Self {
            instruments,
            pick_min,
            chance_to_include: None,
        }
    }

    /// A pool included by a Bernoulli trial.
    pub const fn optional(instruments: &'static [&'static str], chance: f64) -> Self {
        Self {
            instruments,
            pick_min: 0,
            chance_to_include: Some(chance),
        }
    }

    /// An optional pool using [`DEFAULT_OPTIONAL_CHANCE`].
    pub const fn occasional(instruments: &'static [&'static str]) -> Self {
        Self {
            instruments,
            pick_min: 0,
            chance_to_include: None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.pick_min > 0
    }

    /// Probability that an optional pool is included.
    pub fn inclusion_chance(&self) -> f64 {
        self.chance_to_include.unwrap_or(DEFAULT_OPTIONAL_CHANCE)
    }
}

/// Tempo range in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BpmRange {
    pub min: u16,
    pub max: u16,
    pub typical: u16,
}

impl BpmRange {
    /// Formats the range as "between {min} and {max}".
    pub fn describe(&self) -> String {
        format!("between {} and {}", self.min, self.max)
    }
}

/// Vocal descriptor parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VocalStyleTable {
    pub ranges: &'static [&'static str],
    pub deliveries: &'static [&'static str],
    pub techniques: &'static [&'static str],
}

/// Production descriptor parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductionStyleTable {
    pub textures: &'static [&'static str],
    pub reverbs: &'static [&'static str],
}

/// One genre's complete definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDefinition {
    /// Single lowercase token, matched by overrides.
    pub id: &'static str,
    pub name: &'static str,
    pub family: GenreFamily,
    /// Lowercase detection keywords, matched on word boundaries.
    pub keywords: &'static [&'static str],
    /// Pool ids in selection order. Each resolves to an entry in `pools`.
    pub pool_order: &'static [&'static str],
    pub pools: &'static [(&'static str, InstrumentPool)],
    pub moods: &'static [&'static str],
    pub bpm: Option<BpmRange>,
    pub vocal: VocalStyleTable,
    pub production: ProductionStyleTable,
}

impl GenreDefinition {
    /// Looks up a pool by id.
    pub fn pool(&self, id: &str) -> Option<&InstrumentPool> {
        self.pools.iter().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    /// Iterates pools in `pool_order`, skipping ids that do not resolve.
    pub fn ordered_pools(&self) -> impl Iterator<Item = (&'static str, &InstrumentPool)> + '_ {
        self.pool_order
            .iter()
            .filter_map(move |id| self.pool(id).map(|p| (*id, p)))
    }

    /// Every instrument across all pools, in pool order.
    pub fn all_instruments(&self) -> Vec<&'static str> {
        self.ordered_pools()
            .flat_map(|(_, p)| p.instruments.iter().copied())
            .collect()
    }
}
