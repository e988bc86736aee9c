//! Performance adjectives by instrument family.

/// Instrument-name fragment to adjectives. The first matching fragment wins.
pub const ARTICULATIONS: &[(&str, &[&str])] = &[
    ("drum", &["brushed", "tight", "laid-back", "punchy", "shuffling"]),
    ("kick", &["thumping", "punchy", "deep"]),
    ("hat", &["crisp", "skittering", "shimmering"]),
    ("bass", &["walking", "round", "deep", "plucked", "rumbling"]),
    ("piano", &["gentle", "sparse", "rolling", "bright", "felted"]),
    ("rhodes", &["warm", "tremolo-soaked", "mellow"]),
    ("organ", &["swirling", "gospel", "percussive"]),
    ("guitar", &["fingerpicked", "crunchy", "clean", "jangly", "chiming"]),
    ("sax", &["breathy", "soulful", "smoky", "honking"]),
    ("trumpet", &["muted", "bright", "soaring"]),
    ("horn", &["punchy", "swelling", "stabbing"]),
    ("violin", &["legato", "soaring", "pizzicato"]),
    ("cello", &["legato", "mournful", "bowed"]),
    ("string", &["swelling", "pizzicato", "legato", "tremolo"]),
    ("synth", &["lush", "detuned", "shimmering", "pulsing"]),
    ("pad", &["evolving", "lush", "airy"]),
    ("choir", &["soaring", "hushed", "layered"]),
    ("flute", &["airy", "fluttering", "breathy"]),
    ("percussion", &["syncopated", "light", "driving"]),
];

/// Adjectives for instruments with no family match.
pub const GENERIC_ARTICULATIONS: &[&str] = &["expressive", "subtle", "warm", "dynamic"];

/// Adjectives for an instrument, matched by name fragment.
pub fn articulations_for(instrument: &str) -> &'static [&'static str] {
    let lower = instrument.to_lowercase();
    ARTICULATIONS
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, adjectives)| *adjectives)
        .unwrap_or(GENERIC_ARTICULATIONS)
}
