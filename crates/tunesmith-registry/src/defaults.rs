//! Global fallback tables used when no genre component is available.

use crate::types::{ProductionStyleTable, VocalStyleTable};

pub const DEFAULT_VOCAL: VocalStyleTable = VocalStyleTable {
    ranges: &["warm alto", "clear tenor", "soft soprano", "rich baritone"],
    deliveries: &["expressive delivery", "relaxed phrasing", "confident delivery"],
    techniques: &["subtle vibrato", "layered harmonies", "natural breath"],
};

pub const DEFAULT_PRODUCTION: ProductionStyleTable = ProductionStyleTable {
    textures: &["balanced mix", "warm analog tone", "clean modern production"],
    reverbs: &["natural room reverb", "plate reverb", "medium hall reverb"],
};

/// BPM range used when no genre defines one.
pub const DEFAULT_BPM_RANGE: &str = "between 90 and 140";

/// Mood used when nothing else supplies one.
pub const DEFAULT_MOOD: &str = "Evocative";

/// Genre used when nothing else supplies one.
pub const DEFAULT_GENRE: &str = "Cinematic";
