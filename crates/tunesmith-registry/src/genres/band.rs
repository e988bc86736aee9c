//! Band-based genres: jazz, blues, rock, metal, pop, soul, funk, R&B.

use crate::types::{
    BpmRange, GenreDefinition, GenreFamily, InstrumentPool, ProductionStyleTable, VocalStyleTable,
};

const BAND_POOLS: &[&str] = &["rhythm", "harmony", "lead", "color"];

pub(super) const JAZZ: GenreDefinition = GenreDefinition {
    id: "jazz",
    name: "Jazz",
    family: GenreFamily::Jazz,
    keywords: &["jazz", "smooth jazz", "bebop", "swing", "bossa nova", "big band"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["upright bass", "drum kit", "ride cymbal"], 2)),
        ("harmony", InstrumentPool::required(&["piano", "rhodes", "hollow-body guitar"], 2)),
        (
            "lead",
            InstrumentPool::optional(
                &["tenor saxophone", "trumpet", "alto saxophone", "vibraphone", "clarinet"],
                0.7,
            ),
        ),
        ("color", InstrumentPool::occasional(&["flugelhorn", "trombone", "congas"])),
    ],
    moods: &["smooth", "sophisticated", "late-night", "mellow", "swinging", "intimate"],
    bpm: Some(BpmRange {
        min: 80,
        max: 180,
        typical: 120,
    }),
    vocal: VocalStyleTable {
        ranges: &["smoky alto", "warm baritone", "velvet tenor"],
        deliveries: &["crooning", "scat phrasing", "laid-back phrasing"],
        techniques: &["subtle vibrato", "behind-the-beat timing", "breathy tone"],
    },
    production: ProductionStyleTable {
        textures: &["warm analog tape", "live room ambience", "vintage ribbon mics"],
        reverbs: &["small club reverb", "plate reverb", "natural room reverb"],
    },
};

pub(super) const BLUES: GenreDefinition = GenreDefinition {
    id: "blues",
    name: "Blues",
    family: GenreFamily::Blues,
    keywords: &["blues", "delta blues", "twelve bar", "12 bar"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["electric bass", "shuffle drums"], 1)),
        ("harmony", InstrumentPool::required(&["electric guitar", "hammond organ", "piano"], 2)),
        (
            "lead",
            InstrumentPool::optional(&["slide guitar", "harmonica", "lead guitar"], 0.6),
        ),
        ("color", InstrumentPool::occasional(&["horn section", "resonator guitar"])),
    ],
    moods: &["gritty", "soulful", "weary", "raw", "longing", "smoky"],
    bpm: Some(BpmRange {
        min: 60,
        max: 130,
        typical: 90,
    }),
    vocal: VocalStyleTable {
        ranges: &["gravelly baritone", "raspy tenor", "powerful alto"],
        deliveries: &["call-and-response", "growling delivery", "pleading phrasing"],
        techniques: &["bent notes", "melismatic runs", "vocal cracks"],
    },
    production: ProductionStyleTable {
        textures: &["tube amp grit", "live band bleed", "vintage tape hiss"],
        reverbs: &["spring reverb", "juke joint room", "short slapback echo"],
    },
};

pub(super) const RNB: GenreDefinition = GenreDefinition {
    id: "rnb",
    name: "R&B",
    family: GenreFamily::Soul,
    keywords: &["r&b", "rnb", "rhythm and blues", "neo soul"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["808 bass", "crisp drum machine", "finger snaps"], 2)),
        ("harmony", InstrumentPool::required(&["rhodes", "lush synth pads", "clean guitar"], 2)),
        ("lead", InstrumentPool::optional(&["falsetto ad-libs", "synth lead", "strings"], 0.4)),
        ("color", InstrumentPool::occasional(&["harp glissando", "vinyl crackle"])),
    ],
    moods: &["sensual", "smooth", "romantic", "confident", "intimate", "silky"],
    bpm: Some(BpmRange {
        min: 60,
        max: 110,
        typical: 85,
    }),
    vocal: VocalStyleTable {
        ranges: &["silky soprano", "smooth tenor", "rich alto"],
        deliveries: &["intimate delivery", "layered harmonies", "conversational phrasing"],
        techniques: &["melismatic runs", "falsetto flips", "breathy ad-libs"],
    },
    production: ProductionStyleTable {
        textures: &["glossy modern mix", "warm low end", "polished vocal stack"],
        reverbs: &["lush hall reverb", "short plate reverb", "dark room reverb"],
    },
};

pub(super) const SOUL: GenreDefinition = GenreDefinition {
    id: "soul",
    name: "Soul",
    family: GenreFamily::Soul,
    keywords: &["soul", "motown", "northern soul", "gospel"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["electric bass", "drum kit", "tambourine"], 2)),
        ("harmony", InstrumentPool::required(&["hammond organ", "piano", "rhythm guitar"], 2)),
        ("lead", InstrumentPool::optional(&["horn section", "string section"], 0.6)),
        ("color", InstrumentPool::occasional(&["vibraphone", "backing choir"])),
    ],
    moods: &["uplifting", "heartfelt", "warm", "passionate", "joyful", "yearning"],
    bpm: Some(BpmRange {
        min: 70,
        max: 120,
        typical: 96,
    }),
    vocal: VocalStyleTable {
        ranges: &["powerful alto", "gritty tenor", "soaring soprano"],
        deliveries: &["gospel-inflected delivery", "call-and-response", "impassioned belting"],
        techniques: &["melismatic runs", "rasp on sustained notes", "dynamic swells"],
    },
    production: ProductionStyleTable {
        textures: &["vintage tape warmth", "live band energy", "analog console color"],
        reverbs: &["echo chamber reverb", "plate reverb", "natural studio room"],
    },
};

pub(super) const FUNK: GenreDefinition = GenreDefinition {
    id: "funk",
    name: "Funk",
    family: GenreFamily::Soul,
    keywords: &["funk", "funky", "p-funk", "groove"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["slap bass", "tight drum kit", "congas"], 2)),
        ("harmony", InstrumentPool::required(&["clavinet", "wah guitar", "rhythm guitar"], 2)),
        ("lead", InstrumentPool::optional(&["horn section", "synth lead", "talk box"], 0.6)),
        ("color", InstrumentPool::occasional(&["cowbell", "hammond organ"])),
    ],
    moods: &["groovy", "playful", "energetic", "confident", "sweaty", "bouncy"],
    bpm: Some(BpmRange {
        min: 90,
        max: 125,
        typical: 108,
    }),
    vocal: VocalStyleTable {
        ranges: &["gritty tenor", "powerful alto", "gang vocals"],
        deliveries: &["shouted hooks", "rhythmic phrasing", "call-and-response"],
        techniques: &["falsetto squeals", "staccato ad-libs", "grunts and shouts"],
    },
    production: ProductionStyleTable {
        textures: &["dry punchy mix", "tight live drums", "analog tape saturation"],
        reverbs: &["minimal room reverb", "short plate reverb", "dry studio sound"],
    },
};

pub(super) const METAL: GenreDefinition = GenreDefinition {
    id: "metal",
    name: "Metal",
    family: GenreFamily::Rock,
    keywords: &["metal", "heavy metal", "thrash", "metalcore", "doom"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["double kick drums", "distorted bass"], 1)),
        ("harmony", InstrumentPool::required(&["down-tuned guitars", "rhythm guitar"], 1)),
        ("lead", InstrumentPool::optional(&["shred lead guitar", "guitar harmonies"], 0.6)),
        ("color", InstrumentPool::occasional(&["choir", "orchestral strings", "synth pad"])),
    ],
    moods: &["aggressive", "dark", "relentless", "intense", "ominous", "triumphant"],
    bpm: Some(BpmRange {
        min: 90,
        max: 200,
        typical: 150,
    }),
    vocal: VocalStyleTable {
        ranges: &["harsh baritone", "soaring tenor", "guttural low register"],
        deliveries: &["screamed verses", "anthemic clean chorus", "chanted gang vocals"],
        techniques: &["growls", "high belts", "layered screams"],
    },
    production: ProductionStyleTable {
        textures: &["wall of guitars", "tight modern production", "scooped mids"],
        reverbs: &["large arena reverb", "short drum room", "dark hall reverb"],
    },
};

pub(super) const ROCK: GenreDefinition = GenreDefinition {
    id: "rock",
    name: "Rock",
    family: GenreFamily::Rock,
    keywords: &["rock", "rock and roll", "garage", "grunge", "indie rock", "punk"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["drum kit", "electric bass"], 1)),
        ("harmony", InstrumentPool::required(&["electric guitar", "rhythm guitar"], 1)),
        ("lead", InstrumentPool::optional(&["lead guitar", "piano", "hammond organ"], 0.5)),
        ("color", InstrumentPool::occasional(&["tambourine", "acoustic guitar", "strings"])),
    ],
    moods: &["energetic", "rebellious", "anthemic", "driving", "raw", "bold"],
    bpm: Some(BpmRange {
        min: 100,
        max: 160,
        typical: 128,
    }),
    vocal: VocalStyleTable {
        ranges: &["raspy tenor", "powerful baritone", "gritty alto"],
        deliveries: &["anthemic belting", "snarling delivery", "shouted chorus"],
        techniques: &["vocal grit", "doubled vocals", "sustained high notes"],
    },
    production: ProductionStyleTable {
        textures: &["overdriven amps", "live band sound", "punchy drums"],
        reverbs: &["big room reverb", "short plate reverb", "garage room sound"],
    },
};

pub(super) const POP: GenreDefinition = GenreDefinition {
    id: "pop",
    name: "Pop",
    family: GenreFamily::Pop,
    keywords: &["pop", "synth pop", "dance pop", "k-pop", "radio hit"],
    pool_order: BAND_POOLS,
    pools: &[
        ("rhythm", InstrumentPool::required(&["punchy drums", "synth bass", "claps"], 2)),
        ("harmony", InstrumentPool::required(&["bright synths", "piano", "acoustic guitar"], 2)),
        ("lead", InstrumentPool::optional(&["vocal chops", "synth lead", "strings"], 0.5)),
        ("color", InstrumentPool::occasional(&["glockenspiel", "whistles", "guitar plucks"])),
    ],
    moods: &["catchy", "upbeat", "bright", "euphoric", "carefree", "bittersweet"],
    bpm: Some(BpmRange {
        min: 90,
        max: 130,
        typical: 115,
    }),
    vocal: VocalStyleTable {
        ranges: &["bright soprano", "clear tenor", "airy alto"],
        deliveries: &["hooky phrasing", "breathy verses", "big chorus belts"],
        techniques: &["stacked harmonies", "vocal chops", "ad-lib runs"],
    },
    production: ProductionStyleTable {
        textures: &["polished radio mix", "sidechained synths", "crisp top end"],
        reverbs: &["wide stereo reverb", "bright plate reverb", "short room reverb"],
    },
};
