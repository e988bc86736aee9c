//! Acoustic, regional and orchestral genres.

use crate::types::{
    BpmRange, GenreDefinition, GenreFamily, InstrumentPool, ProductionStyleTable, VocalStyleTable,
};

pub(super) const REGGAE: GenreDefinition = GenreDefinition {
    id: "reggae",
    name: "Reggae",
    family: GenreFamily::Latin,
    keywords: &["reggae", "dub", "ska", "dancehall", "roots reggae"],
    pool_order: &["rhythm", "skank", "color"],
    pools: &[
        ("rhythm", InstrumentPool::required(&["deep bass", "one-drop drums"], 1)),
        ("skank", InstrumentPool::required(&["offbeat guitar", "organ bubble", "piano"], 2)),
        ("color", InstrumentPool::optional(&["melodica", "horn section", "percussion"], 0.4)),
    ],
    moods: &["laid-back", "sunny", "conscious", "hypnotic", "warm", "uplifting"],
    bpm: Some(BpmRange {
        min: 60,
        max: 90,
        typical: 75,
    }),
    vocal: VocalStyleTable {
        ranges: &["warm tenor", "rich baritone", "soulful alto"],
        deliveries: &["relaxed toasting", "chanted refrains", "melodic patois phrasing"],
        techniques: &["harmony backing vocals", "dub echo throws", "call-and-response"],
    },
    production: ProductionStyleTable {
        textures: &["heavy low end", "analog dub mix", "warm tape sound"],
        reverbs: &["spring reverb", "tape echo", "dub delay"],
    },
};

pub(super) const LATIN: GenreDefinition = GenreDefinition {
    id: "latin",
    name: "Latin",
    family: GenreFamily::Latin,
    keywords: &["latin", "salsa", "cumbia", "reggaeton", "bachata", "flamenco"],
    pool_order: &["rhythm", "harmony", "lead", "color"],
    pools: &[
        ("rhythm", InstrumentPool::required(&["congas", "timbales", "bass guitar"], 2)),
        ("harmony", InstrumentPool::required(&["nylon guitar", "piano montuno", "tres"], 2)),
        ("lead", InstrumentPool::optional(&["trumpet section", "flute", "accordion"], 0.6)),
        ("color", InstrumentPool::occasional(&["guiro", "maracas", "claves"])),
    ],
    moods: &["passionate", "festive", "sultry", "vibrant", "sunny", "romantic"],
    bpm: Some(BpmRange {
        min: 85,
        max: 180,
        typical: 110,
    }),
    vocal: VocalStyleTable {
        ranges: &["passionate tenor", "sultry alto", "bright soprano"],
        deliveries: &["spanish-language phrasing", "coro responses", "rhythmic delivery"],
        techniques: &["ornamented runs", "shouted soneos", "tight harmonies"],
    },
    production: ProductionStyleTable {
        textures: &["live percussion ensemble", "bright mix", "warm acoustic tone"],
        reverbs: &["dance hall room", "plate reverb", "natural room reverb"],
    },
};

pub(super) const COUNTRY: GenreDefinition = GenreDefinition {
    id: "country",
    name: "Country",
    family: GenreFamily::Folk,
    keywords: &["country", "honky tonk", "americana", "bluegrass", "western"],
    pool_order: &["rhythm", "harmony", "lead", "color"],
    pools: &[
        ("rhythm", InstrumentPool::required(&["train-beat drums", "upright bass"], 1)),
        ("harmony", InstrumentPool::required(&["acoustic guitar", "telecaster"], 1)),
        ("lead", InstrumentPool::optional(&["pedal steel", "fiddle", "banjo"], 0.7)),
        ("color", InstrumentPool::occasional(&["harmonica", "mandolin", "dobro"])),
    ],
    moods: &["nostalgic", "heartfelt", "rowdy", "homespun", "wistful", "sunny"],
    bpm: Some(BpmRange {
        min: 70,
        max: 140,
        typical: 100,
    }),
    vocal: VocalStyleTable {
        ranges: &["warm baritone", "twangy tenor", "clear alto"],
        deliveries: &["storytelling delivery", "sincere phrasing", "honky tonk swagger"],
        techniques: &["southern twang", "yodel breaks", "close harmonies"],
    },
    production: ProductionStyleTable {
        textures: &["nashville studio polish", "organic acoustic mix", "warm tape tone"],
        reverbs: &["natural room reverb", "barn ambience", "light plate reverb"],
    },
};

pub(super) const FOLK: GenreDefinition = GenreDefinition {
    id: "folk",
    name: "Folk",
    family: GenreFamily::Folk,
    keywords: &["folk", "acoustic", "singer-songwriter", "campfire", "celtic"],
    pool_order: &["strings", "support", "color"],
    pools: &[
        ("strings", InstrumentPool::required(&["acoustic guitar", "fingerpicked guitar"], 1)),
        ("support", InstrumentPool::optional(&["upright bass", "soft hand percussion"], 0.5)),
        ("color", InstrumentPool::optional(&["mandolin", "fiddle", "banjo", "harmonium"], 0.4)),
    ],
    moods: &["intimate", "earthy", "wistful", "gentle", "reflective", "pastoral"],
    bpm: Some(BpmRange {
        min: 70,
        max: 120,
        typical: 92,
    }),
    vocal: VocalStyleTable {
        ranges: &["gentle tenor", "warm alto", "hushed baritone"],
        deliveries: &["storytelling delivery", "close-mic intimacy", "plainspoken phrasing"],
        techniques: &["natural breath", "two-part harmonies", "unpolished tone"],
    },
    production: ProductionStyleTable {
        textures: &["organic acoustic recording", "close-mic warmth", "minimal overdubs"],
        reverbs: &["wooden room ambience", "church reverb", "natural room reverb"],
    },
};

pub(super) const CLASSICAL: GenreDefinition = GenreDefinition {
    id: "classical",
    name: "Classical",
    family: GenreFamily::Orchestral,
    keywords: &["classical", "orchestral", "symphony", "string quartet", "baroque", "chamber"],
    pool_order: &["strings", "keys", "winds", "color"],
    pools: &[
        ("strings", InstrumentPool::required(&["violin", "cello", "viola"], 2)),
        ("keys", InstrumentPool::optional(&["grand piano", "harpsichord"], 0.5)),
        ("winds", InstrumentPool::optional(&["flute", "oboe", "french horn", "clarinet"], 0.5)),
        ("color", InstrumentPool::occasional(&["harp", "timpani", "celesta"])),
    ],
    moods: &["elegant", "majestic", "poignant", "serene", "dramatic", "graceful"],
    bpm: Some(BpmRange {
        min: 50,
        max: 140,
        typical: 84,
    }),
    vocal: VocalStyleTable {
        ranges: &["operatic soprano", "lyric tenor", "mezzo-soprano"],
        deliveries: &["bel canto phrasing", "choral delivery", "legato lines"],
        techniques: &["controlled vibrato", "wide dynamics", "sustained phrases"],
    },
    production: ProductionStyleTable {
        textures: &["concert hall recording", "natural dynamics", "wide stereo image"],
        reverbs: &["concert hall reverb", "cathedral ambience", "chamber room reverb"],
    },
};

pub(super) const CINEMATIC: GenreDefinition = GenreDefinition {
    id: "cinematic",
    name: "Cinematic",
    family: GenreFamily::Orchestral,
    keywords: &["cinematic", "film score", "soundtrack", "trailer", "epic"],
    pool_order: &["orchestra", "pulse", "color"],
    pools: &[
        ("orchestra", InstrumentPool::required(&["string ensemble", "brass section", "choir"], 2)),
        ("pulse", InstrumentPool::optional(&["taiko drums", "ostinato strings", "synth pulse"], 0.6)),
        ("color", InstrumentPool::optional(&["solo piano", "celesta", "ambient pads"], 0.3)),
    ],
    moods: &["epic", "suspenseful", "heroic", "emotional", "vast", "tense"],
    // Film cues follow picture, not a tempo band.
    bpm: None,
    vocal: VocalStyleTable {
        ranges: &["ethereal soprano", "choral voices", "solo boy soprano"],
        deliveries: &["wordless vocalise", "latin chant", "distant hum"],
        techniques: &["long sustained tones", "layered choir", "swelling dynamics"],
    },
    production: ProductionStyleTable {
        textures: &["hybrid orchestral mix", "deep sub hits", "wide panoramic stereo"],
        reverbs: &["scoring stage reverb", "huge hall reverb", "cathedral ambience"],
    },
};
