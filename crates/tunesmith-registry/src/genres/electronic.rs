//! Electronic and beat-driven genres.

use crate::types::{
    BpmRange, GenreDefinition, GenreFamily, InstrumentPool, ProductionStyleTable, VocalStyleTable,
};

const BEAT_POOLS: &[&str] = &["drums", "bass", "synths", "texture"];

pub(super) const LOFI: GenreDefinition = GenreDefinition {
    id: "lofi",
    name: "Lo-Fi",
    family: GenreFamily::Urban,
    keywords: &["lofi", "lo-fi", "chillhop", "study beats", "lo fi"],
    pool_order: &["drums", "keys", "texture", "color"],
    pools: &[
        ("drums", InstrumentPool::required(&["dusty boom bap drums", "soft kick", "rimshot"], 2)),
        ("keys", InstrumentPool::required(&["mellow rhodes", "jazzy piano", "nylon guitar"], 2)),
        ("texture", InstrumentPool::optional(&["vinyl crackle", "tape hiss", "rain ambience"], 0.8)),
        ("color", InstrumentPool::occasional(&["muted trumpet", "soft flute", "upright bass"])),
    ],
    moods: &["chill", "nostalgic", "cozy", "dreamy", "hazy", "melancholic"],
    bpm: Some(BpmRange {
        min: 70,
        max: 90,
        typical: 80,
    }),
    vocal: VocalStyleTable {
        ranges: &["soft alto", "hushed tenor", "chopped vocal samples"],
        deliveries: &["sleepy delivery", "murmured phrasing", "sparse hooks"],
        techniques: &["lo-fi filtering", "pitched vocal chops", "whispered layers"],
    },
    production: ProductionStyleTable {
        textures: &["tape saturation", "bit-crushed warmth", "wobbly cassette tone"],
        reverbs: &["small room reverb", "lo-fi spring reverb", "dark plate reverb"],
    },
};

pub(super) const SYNTHWAVE: GenreDefinition = GenreDefinition {
    id: "synthwave",
    name: "Synthwave",
    family: GenreFamily::Electronic,
    keywords: &["synthwave", "retrowave", "outrun", "80s synth", "vaporwave"],
    pool_order: BEAT_POOLS,
    pools: &[
        ("drums", InstrumentPool::required(&["gated drum machine", "linndrum"], 1)),
        ("bass", InstrumentPool::required(&["arpeggiated synth bass", "analog bass"], 1)),
        ("synths", InstrumentPool::required(&["analog polysynth", "lead synth", "brass synth"], 2)),
        ("texture", InstrumentPool::optional(&["electric guitar solo", "saxophone", "choir pad"], 0.3)),
    ],
    moods: &["nostalgic", "neon", "nocturnal", "driving", "dreamy", "retro"],
    bpm: Some(BpmRange {
        min: 80,
        max: 118,
        typical: 100,
    }),
    vocal: VocalStyleTable {
        ranges: &["airy tenor", "cool alto", "vocoded voice"],
        deliveries: &["detached delivery", "dreamy phrasing", "anthemic chorus"],
        techniques: &["chorus-drenched vocals", "vocoder harmonies", "doubled vocals"],
    },
    production: ProductionStyleTable {
        textures: &["analog synth warmth", "vhs saturation", "wide stereo chorus"],
        reverbs: &["gated reverb", "huge hall reverb", "shimmer reverb"],
    },
};

pub(super) const TECHNO: GenreDefinition = GenreDefinition {
    id: "techno",
    name: "Techno",
    family: GenreFamily::Electronic,
    keywords: &["techno", "warehouse", "minimal techno", "industrial techno", "rave"],
    pool_order: BEAT_POOLS,
    pools: &[
        ("drums", InstrumentPool::required(&["909 kick", "open hi-hats", "clap"], 2)),
        ("bass", InstrumentPool::required(&["rumbling sub bass", "acid 303 line"], 1)),
        ("synths", InstrumentPool::optional(&["hypnotic synth stab", "modular sequence"], 0.7)),
        ("texture", InstrumentPool::occasional(&["industrial noise", "metallic percussion"])),
    ],
    moods: &["hypnotic", "dark", "relentless", "mechanical", "driving", "euphoric"],
    bpm: Some(BpmRange {
        min: 120,
        max: 150,
        typical: 132,
    }),
    vocal: VocalStyleTable {
        ranges: &["robotic voice", "spoken word", "distant female vocal"],
        deliveries: &["chanted loops", "whispered phrases", "sparse vocal hits"],
        techniques: &["heavy vocal processing", "delay throws", "chopped syllables"],
    },
    production: ProductionStyleTable {
        textures: &["warehouse sound system", "distorted low end", "analog drum machines"],
        reverbs: &["dark warehouse reverb", "metallic plate reverb", "dub techno delay"],
    },
};

pub(super) const HOUSE: GenreDefinition = GenreDefinition {
    id: "house",
    name: "House",
    family: GenreFamily::Electronic,
    keywords: &["house", "deep house", "disco house", "garage house", "club"],
    pool_order: BEAT_POOLS,
    pools: &[
        ("drums", InstrumentPool::required(&["four-on-the-floor kick", "shuffled hi-hats"], 1)),
        ("bass", InstrumentPool::required(&["rolling bassline", "deep sub bass"], 1)),
        ("synths", InstrumentPool::optional(&["piano chords", "organ stabs", "warm pads"], 0.7)),
        ("texture", InstrumentPool::occasional(&["disco strings", "vocal sample chops"])),
    ],
    moods: &["euphoric", "groovy", "uplifting", "sensual", "warm", "hypnotic"],
    bpm: Some(BpmRange {
        min: 118,
        max: 128,
        typical: 124,
    }),
    vocal: VocalStyleTable {
        ranges: &["diva soprano", "soulful alto", "deep male voice"],
        deliveries: &["gospel-tinged hooks", "repeated mantras", "spoken interludes"],
        techniques: &["filtered vocal chops", "big belted hooks", "echoing ad-libs"],
    },
    production: ProductionStyleTable {
        textures: &["sidechain pumping", "warm analog groove", "club-ready low end"],
        reverbs: &["lush hall reverb", "short room reverb", "tape delay"],
    },
};

pub(super) const HIPHOP: GenreDefinition = GenreDefinition {
    id: "hiphop",
    name: "Hip-Hop",
    family: GenreFamily::Urban,
    keywords: &["hiphop", "hip hop", "hip-hop", "rap", "boom bap", "trap"],
    pool_order: &["drums", "bass", "samples", "color"],
    pools: &[
        ("drums", InstrumentPool::required(&["hard-hitting drums", "808 kick", "trap hi-hats"], 2)),
        ("bass", InstrumentPool::required(&["808 bass", "sub bass"], 1)),
        ("samples", InstrumentPool::optional(&["soul sample", "piano loop", "string sample"], 0.7)),
        ("color", InstrumentPool::occasional(&["record scratches", "synth bells"])),
    ],
    moods: &["confident", "gritty", "dark", "triumphant", "laid-back", "hard"],
    bpm: Some(BpmRange {
        min: 70,
        max: 100,
        typical: 88,
    }),
    vocal: VocalStyleTable {
        ranges: &["deep baritone rap", "sharp tenor flow", "melodic rap"],
        deliveries: &["rapid-fire flow", "laid-back flow", "chanted hook"],
        techniques: &["internal rhymes", "ad-lib layers", "double-time bars"],
    },
    production: ProductionStyleTable {
        textures: &["heavy sub bass", "crisp modern mix", "dusty sampled texture"],
        reverbs: &["dry vocal booth", "dark room reverb", "short plate reverb"],
    },
};

pub(super) const AMBIENT: GenreDefinition = GenreDefinition {
    id: "ambient",
    name: "Ambient",
    family: GenreFamily::Ambient,
    keywords: &["ambient", "drone", "soundscape", "atmospheric", "meditation"],
    pool_order: &["pads", "texture", "color"],
    pools: &[
        ("pads", InstrumentPool::required(&["evolving synth pads", "drone", "granular textures"], 2)),
        ("texture", InstrumentPool::optional(&["field recordings", "tape loops", "bowed guitar"], 0.5)),
        ("color", InstrumentPool::optional(&["felt piano", "singing bowls", "distant chimes"], 0.4)),
    ],
    moods: &["serene", "ethereal", "meditative", "vast", "floating", "calm"],
    bpm: Some(BpmRange {
        min: 50,
        max: 90,
        typical: 70,
    }),
    vocal: VocalStyleTable {
        ranges: &["ethereal soprano", "breathy alto", "distant choir"],
        deliveries: &["wordless vocalise", "whispered fragments", "slow drifting phrases"],
        techniques: &["heavy reverb wash", "layered harmonics", "reversed vocals"],
    },
    production: ProductionStyleTable {
        textures: &["slowly evolving layers", "soft tape saturation", "wide stereo field"],
        reverbs: &["infinite reverb", "cathedral ambience", "shimmer reverb"],
    },
};

pub(super) const ELECTRONIC: GenreDefinition = GenreDefinition {
    id: "electronic",
    name: "Electronic",
    family: GenreFamily::Electronic,
    keywords: &["electronic", "edm", "electronica", "idm", "dubstep", "drum and bass"],
    pool_order: BEAT_POOLS,
    pools: &[
        ("drums", InstrumentPool::required(&["punchy electronic drums", "drum machine"], 1)),
        ("bass", InstrumentPool::required(&["synth bass", "wobble bass", "sub bass"], 2)),
        ("synths", InstrumentPool::optional(&["supersaw lead", "plucky synth", "arpeggiator"], 0.7)),
        ("texture", InstrumentPool::occasional(&["risers", "glitch effects", "vocal chops"])),
    ],
    moods: &["energetic", "futuristic", "euphoric", "pulsing", "bright", "intense"],
    bpm: Some(BpmRange {
        min: 110,
        max: 175,
        typical: 128,
    }),
    vocal: VocalStyleTable {
        ranges: &["airy soprano", "processed tenor", "vocoded voice"],
        deliveries: &["hooky topline", "chopped phrases", "festival chant"],
        techniques: &["autotuned sheen", "vocal chops", "stacked harmonies"],
    },
    production: ProductionStyleTable {
        textures: &["sidechain compression", "crisp digital sheen", "heavy low end"],
        reverbs: &["wide hall reverb", "ping-pong delay", "bright plate reverb"],
    },
};
