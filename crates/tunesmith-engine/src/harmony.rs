//! Key and chord progression draws.

use tunesmith_registry::harmony::{modes_for, progressions_for, TONICS};
use tunesmith_registry::GenreDefinition;
use tunesmith_spec::TraceCollector;

use crate::rng::{pick, RandomSource};

/// Draws a key as "{tonic} {mode}", e.g. "D Dorian".
///
/// The mode table depends on the primary genre; minor-leaning genres favour
/// minor, dorian and phrygian.
pub fn select_key(
    primary: &GenreDefinition,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> String {
    let tonic = pick(rng, TONICS).copied().unwrap_or("C");
    let mode = pick(rng, modes_for(primary.id)).copied().unwrap_or("Major");
    let key = format!("{} {}", tonic, mode);
    trace.selection(
        "harmony",
        "key",
        format!("mode table for {}", primary.id),
        TONICS.len(),
        &[key.clone()],
    );
    key
}

/// Draws a chord progression for the primary genre's family.
pub fn select_chord_progression(
    primary: &GenreDefinition,
    rng: &mut dyn RandomSource,
    trace: &mut TraceCollector,
) -> String {
    let table = progressions_for(primary.family);
    let progression = pick(rng, table).copied().unwrap_or("I - IV - V - I").to_string();
    trace.selection(
        "harmony",
        "chords",
        format!("{:?} progressions", primary.family),
        table.len(),
        &[progression.clone()],
    );
    progression
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandom;
    use tunesmith_registry::genre;

    #[test]
    fn test_key_uses_genre_mode_table() {
        let mut trace = TraceCollector::disabled();
        // 0.0 picks C, then the first mode of each table.
        let metal = genre("metal").unwrap();
        assert_eq!(select_key(metal, &mut SequenceRandom::constant(0.0), &mut trace), "C Minor");
        let pop = genre("pop").unwrap();
        assert_eq!(select_key(pop, &mut SequenceRandom::constant(0.0), &mut trace), "C Major");
    }

    #[test]
    fn test_last_tonic_reachable() {
        let jazz = genre("jazz").unwrap();
        let key = select_key(jazz, &mut SequenceRandom::constant(0.999), &mut TraceCollector::disabled());
        assert!(key.starts_with("B "), "{}", key);
    }

    #[test]
    fn test_progression_from_family_table() {
        let jazz = genre("jazz").unwrap();
        let progression =
            select_chord_progression(jazz, &mut SequenceRandom::constant(0.0), &mut TraceCollector::disabled());
        assert_eq!(progression, "ii7 - V7 - Imaj7");
    }
}
