//! Section phrase templates and title vocabulary.
//!
//! Templates use `{inst}`, `{inst2}` and `{mood}` placeholders, filled with
//! the instruments and mood already selected for the track.

use crate::types::GenreFamily;

/// Phrase templates for the five song sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTemplates {
    pub intro: &'static [&'static str],
    pub verse: &'static [&'static str],
    pub chorus: &'static [&'static str],
    pub bridge: &'static [&'static str],
    pub outro: &'static [&'static str],
}

const BAND: SectionTemplates = SectionTemplates {
    intro: &[
        "{inst} sets the groove alone, {mood} and unhurried",
        "Count-in, then {inst} and {inst2} lock in together",
        "A short {inst} motif introduces the {mood} feel",
    ],
    verse: &[
        "{inst} carries the melody while {inst2} keeps time",
        "Sparse arrangement, {inst} answering the vocal lines",
        "{inst2} drives the rhythm under a restrained {inst}",
    ],
    chorus: &[
        "Full band lifts, {inst} and {inst2} in unison",
        "Big {mood} hook, {inst} doubling the melody",
        "Energy peaks with {inst} pushing forward",
    ],
    bridge: &[
        "Breakdown to {inst2} alone, tension building",
        "{inst} takes a short solo over shifting chords",
        "Half-time feel, {inst} and {inst2} trading phrases",
    ],
    outro: &[
        "{inst} repeats the main motif and fades",
        "Final chorus tag, ending on a sustained {inst} chord",
        "Band drops out, leaving {inst2} to close",
    ],
};

const ELECTRONIC: SectionTemplates = SectionTemplates {
    intro: &[
        "Filtered {inst} fades in over a muted beat",
        "Atmospheric build, {inst2} pulsing underneath",
        "{inst} arpeggio opens, {mood} and spacious",
    ],
    verse: &[
        "{inst2} locks the groove, {inst} weaving through",
        "Stripped-back beat with {inst} stabs",
        "{inst} sequence evolves while {inst2} holds the low end",
    ],
    chorus: &[
        "Drop hits, {inst} and {inst2} at full energy",
        "Wide {mood} lead on {inst}, sidechained to the kick",
        "Euphoric lift, {inst} soaring over the groove",
    ],
    bridge: &[
        "Breakdown, {inst} alone with a rising sweep",
        "Filter closes on {inst2}, tension before the return",
        "Half-time section, {inst} re-pitched and stretched",
    ],
    outro: &[
        "{inst2} strips away layer by layer",
        "{inst} echoes out into a long tail",
        "Beat fades, leaving the {mood} {inst} pad",
    ],
};

const ATMOSPHERIC: SectionTemplates = SectionTemplates {
    intro: &[
        "{inst} emerges slowly from silence",
        "A {mood} swell of {inst} and {inst2}",
        "Distant {inst} over a sustained drone",
    ],
    verse: &[
        "{inst} states a quiet theme, {inst2} shading underneath",
        "Slow-moving {inst} lines, space between phrases",
        "{inst2} adds texture while {inst} drifts",
    ],
    chorus: &[
        "Full swell, {inst} and {inst2} rising together",
        "The theme returns on {inst}, broad and {mood}",
        "Layers bloom around a soaring {inst}",
    ],
    bridge: &[
        "Harmony shifts, {inst2} alone and fragile",
        "Tension builds under {inst}, unresolved",
        "A brief hush before {inst} returns",
    ],
    outro: &[
        "{inst} dissolves into reverb",
        "Final {mood} chord held on {inst2}",
        "Slow fade to the opening {inst} drone",
    ],
};

const URBAN: SectionTemplates = SectionTemplates {
    intro: &[
        "{inst} loop plays filtered, beat drops in after four bars",
        "Dusty {inst} sample sets a {mood} scene",
        "{inst2} and vinyl texture open the track",
    ],
    verse: &[
        "{inst2} knocks under a looping {inst}",
        "Laid-back pocket, {inst} chopped and flipped",
        "Minimal beat, {inst} filling the gaps",
    ],
    chorus: &[
        "Hook lands, {inst} doubled and layered",
        "{inst2} hits harder, {inst} opens up",
        "{mood} refrain over the full {inst} loop",
    ],
    bridge: &[
        "Beat switch, {inst} pitched down",
        "Drums drop, {inst} alone with a vocal chop",
        "{inst2} rides solo for eight bars",
    ],
    outro: &[
        "{inst} loop plays out with tape stop",
        "Beat fades, {inst2} lingers",
        "Filtered {inst} closes the track",
    ],
};

/// Section templates for a genre family.
pub fn section_templates(family: GenreFamily) -> &'static SectionTemplates {
    match family {
        GenreFamily::Electronic => &ELECTRONIC,
        GenreFamily::Ambient | GenreFamily::Orchestral => &ATMOSPHERIC,
        GenreFamily::Urban => &URBAN,
        GenreFamily::Jazz
        | GenreFamily::Blues
        | GenreFamily::Rock
        | GenreFamily::Pop
        | GenreFamily::Soul
        | GenreFamily::Folk
        | GenreFamily::Latin => &BAND,
    }
}

/// Adjectives for generated titles.
pub const TITLE_ADJECTIVES: &[&str] = &[
    "Midnight", "Golden", "Velvet", "Neon", "Silent", "Electric", "Faded", "Crimson",
    "Hollow", "Distant", "Broken", "Wild", "Paper", "Glass", "Northern", "Lonely",
];

/// Nouns for generated titles.
pub const TITLE_NOUNS: &[&str] = &[
    "Avenue", "Horizon", "Echoes", "Harbor", "Skyline", "Tides", "Embers", "Satellite",
    "Garden", "Parade", "Motel", "Letters", "Rivers", "Signals", "Daydream", "Static",
];

/// Title patterns; `{adj}`, `{noun}` and `{mood}` are substituted.
pub const TITLE_PATTERNS: &[&str] = &[
    "{adj} {noun}",
    "The {adj} {noun}",
    "{noun} of the {adj} Hour",
    "{mood} {noun}",
];

/// Recording-context descriptors for the `recording` field.
pub const RECORDING_ACOUSTIC: &[&str] = &[
    "live studio session, natural room sound",
    "analog tape recording, warm console",
    "intimate close-mic recording",
    "vintage studio, minimal overdubs",
];

pub const RECORDING_ELECTRONIC: &[&str] = &[
    "modern studio production, crisp digital mix",
    "hardware synth session, analog summing",
    "bedroom producer mix, tape emulation",
    "club master, wide stereo image",
];
