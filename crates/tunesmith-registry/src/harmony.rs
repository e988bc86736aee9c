//! Keys, modes, and chord progressions.

use crate::types::GenreFamily;

/// The twelve tonics, spelled the way they are most often written.
pub const TONICS: &[&str] = &["C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B"];

/// Modes for genres that lean major. Repeats weight the draw.
pub const MAJOR_LEANING_MODES: &[&str] = &["Major", "Major", "Mixolydian", "Lydian", "Minor"];

/// Modes for genres that lean minor. Repeats weight the draw.
pub const MINOR_LEANING_MODES: &[&str] = &["Minor", "Minor", "Dorian", "Phrygian", "Major"];

/// Genres whose key draw favours minor modes.
pub const MINOR_LEANING_GENRES: &[&str] = &[
    "metal", "techno", "hiphop", "lofi", "synthwave", "cinematic", "blues", "ambient", "rnb",
];

/// Mode table for a genre.
pub fn modes_for(genre_id: &str) -> &'static [&'static str] {
    if MINOR_LEANING_GENRES.contains(&genre_id) {
        MINOR_LEANING_MODES
    } else {
        MAJOR_LEANING_MODES
    }
}

/// Progressions written as roman numerals so they fit any drawn key.
pub const CHORD_PROGRESSIONS: &[(GenreFamily, &[&str])] = &[
    (
        GenreFamily::Jazz,
        &["ii7 - V7 - Imaj7", "Imaj7 - vi7 - ii7 - V7", "iii7 - VI7 - ii7 - V7", "Imaj7 - IV7 - iii7 - VI7"],
    ),
    (
        GenreFamily::Blues,
        &["I7 - IV7 - I7 - V7", "i7 - iv7 - i7 - V7", "I7 - I7 - IV7 - I7 - V7 - IV7"],
    ),
    (
        GenreFamily::Rock,
        &["I - bVII - IV - I", "i - bVI - bVII - i", "I - V - vi - IV", "I - IV - V - IV"],
    ),
    (
        GenreFamily::Pop,
        &["I - V - vi - IV", "vi - IV - I - V", "I - vi - IV - V", "IV - I - V - vi"],
    ),
    (
        GenreFamily::Soul,
        &["Imaj7 - iii7 - vi7 - IV", "ii7 - V7 - iii7 - vi7", "I - IV - ii7 - V", "i9 - iv9"],
    ),
    (
        GenreFamily::Folk,
        &["I - IV - I - V", "vi - IV - I - V", "I - V - vi - iii - IV", "I - IV - vi - V"],
    ),
    (
        GenreFamily::Urban,
        &["i - bVI - bIII - bVII", "ii9 - V9 - Imaj9", "i7 - iv7", "vi7 - ii7 - V7 - Imaj7"],
    ),
    (
        GenreFamily::Electronic,
        &["i - bVI - bIII - bVII", "vi - IV - I - V", "i - bVII - bVI - bVII", "i - iv - bVI - v"],
    ),
    (
        GenreFamily::Ambient,
        &["Imaj7 - IVmaj7", "i - bVI", "I - iii - IV", "sus2 drone on I"],
    ),
    (
        GenreFamily::Orchestral,
        &["i - bVI - bIII - bVII", "I - V - vi - iii - IV", "i - iv - V - i", "I - IV - ii - V"],
    ),
    (
        GenreFamily::Latin,
        &["i - iv - V - i", "I - IV - V - IV", "i - bVII - bVI - V", "ii - V - I"],
    ),
];

/// Fallback progressions for families with no entry.
pub const GENERIC_PROGRESSIONS: &[&str] = &["I - V - vi - IV", "I - IV - V - I", "vi - IV - I - V"];

/// Progressions for a genre family, falling back to [`GENERIC_PROGRESSIONS`].
pub fn progressions_for(family: GenreFamily) -> &'static [&'static str] {
    CHORD_PROGRESSIONS
        .iter()
        .find(|(f, _)| *f == family)
        .map(|(_, p)| *p)
        .unwrap_or(GENERIC_PROGRESSIONS)
}
