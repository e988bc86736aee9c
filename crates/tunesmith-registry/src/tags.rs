//! Style tag tables.

/// Genres classified as electronic for tag selection.
pub const ELECTRONIC_GENRES: &[&str] = &[
    "electronic",
    "synthwave",
    "techno",
    "house",
    "lofi",
    "hiphop",
    "ambient",
];

/// Recording-realism tags for acoustic genres.
pub const REALISM_TAGS: &[(&str, &[&str])] = &[
    (
        "jazz",
        &["live room recording", "audible breaths", "natural dynamics", "ensemble bleed", "brushwork detail"],
    ),
    (
        "blues",
        &["amp hum", "live take feel", "string bends", "room microphones", "imperfect timing"],
    ),
    (
        "rock",
        &["live drums", "amp feedback", "analog warmth", "raw takes", "room mics"],
    ),
    (
        "metal",
        &["tight palm mutes", "live drum dynamics", "quad-tracked guitars", "pick attack"],
    ),
    (
        "folk",
        &["fret noise", "close mic", "wooden resonance", "natural reverb", "single take"],
    ),
    (
        "country",
        &["pedal steel swells", "live band", "natural room", "string noise"],
    ),
    (
        "classical",
        &["concert hall acoustics", "bow noise", "natural dynamics", "orchestral seating"],
    ),
    (
        "soul",
        &["vintage console", "live horns", "tape warmth", "room bleed"],
    ),
    (
        "funk",
        &["ghost notes", "tight pocket", "dry drums", "live horns"],
    ),
    (
        "rnb",
        &["intimate vocal mic", "warm low end", "smooth layering"],
    ),
    (
        "reggae",
        &["live dub mixing", "tape echo", "organic percussion"],
    ),
];

/// Synthesis and production tags for electronic genres.
pub const ELECTRONIC_TAGS: &[(&str, &[&str])] = &[
    (
        "electronic",
        &["sidechain compression", "crisp transients", "stereo width", "synth layering", "clean drops"],
    ),
    (
        "synthwave",
        &["analog synth warmth", "gated reverb drums", "retro arpeggios", "vhs texture", "sidechain pulse"],
    ),
    (
        "techno",
        &["analog drum machines", "hypnotic loops", "modular textures", "warehouse low end"],
    ),
    (
        "house",
        &["four-on-the-floor", "filter sweeps", "sidechain pumping", "analog groove"],
    ),
    (
        "lofi",
        &["vinyl crackle", "tape wobble", "sampled textures", "swung drums", "muffled highs"],
    ),
    (
        "hiphop",
        &["808 sub", "sampled drums", "crisp hi-hats", "punchy low end"],
    ),
    (
        "ambient",
        &["granular textures", "long reverb tails", "slow evolution", "spectral layers"],
    ),
];

/// Fallback tags when a genre has no realism or electronic table.
pub const GENERIC_TAGS: &[&str] = &[
    "high fidelity",
    "clear mix",
    "balanced dynamics",
    "polished production",
    "wide stereo",
    "studio quality",
];

/// Returns true if the genre is classified as electronic.
pub fn is_electronic(genre_id: &str) -> bool {
    ELECTRONIC_GENRES.contains(&genre_id)
}

/// Realism tags for a genre, empty if it has none.
pub fn realism_tags(genre_id: &str) -> &'static [&'static str] {
    lookup(REALISM_TAGS, genre_id)
}

/// Electronic tags for a genre, empty if it has none.
pub fn electronic_tags(genre_id: &str) -> &'static [&'static str] {
    lookup(ELECTRONIC_TAGS, genre_id)
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    genre_id: &str,
) -> &'static [&'static str] {
    table
        .iter()
        .find(|(id, _)| *id == genre_id)
        .map(|(_, tags)| *tags)
        .unwrap_or(&[])
}
