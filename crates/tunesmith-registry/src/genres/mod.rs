//! Genre definitions.
//!
//! Order matters: keyword detection walks [`GENRES`] front to back and the
//! first hit wins, so more specific genres (lo-fi before hip-hop, synthwave
//! before electronic) come first.

mod band;
mod electronic;
mod roots;

use crate::types::GenreDefinition;

/// Every known genre, in detection priority order.
pub static GENRES: &[GenreDefinition] = &[
    electronic::LOFI,
    electronic::SYNTHWAVE,
    electronic::TECHNO,
    electronic::HOUSE,
    electronic::HIPHOP,
    band::JAZZ,
    band::BLUES,
    band::RNB,
    band::SOUL,
    band::FUNK,
    roots::REGGAE,
    roots::LATIN,
    band::METAL,
    band::ROCK,
    roots::COUNTRY,
    roots::FOLK,
    roots::CLASSICAL,
    roots::CINEMATIC,
    electronic::AMBIENT,
    electronic::ELECTRONIC,
    band::POP,
];

/// Looks up a genre by id (case-insensitive).
pub fn genre(id: &str) -> Option<&'static GenreDefinition> {
    GENRES.iter().find(|g| g.id.eq_ignore_ascii_case(id))
}

/// Returns true if `id` names a known genre.
pub fn is_known(id: &str) -> bool {
    genre(id).is_some()
}

/// Every genre id, in detection priority order.
pub fn genre_ids() -> Vec<&'static str> {
    GENRES.iter().map(|g| g.id).collect()
}
