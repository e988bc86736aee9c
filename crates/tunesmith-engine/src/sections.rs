//! Song section blocks built from family phrase templates.

use tunesmith_registry::{section_templates, GenreFamily};

use crate::rng::{pick, RandomSource};

/// Stand-in when no instrument was selected.
const FALLBACK_INSTRUMENT: &str = "the arrangement";

/// Inputs to [`build_all_sections`].
#[derive(Debug, Clone, Copy)]
pub struct SectionInput<'a> {
    pub family: GenreFamily,
    pub mood: &'a str,
    /// The instruments already chosen for the header.
    pub instruments: &'a [String],
    /// Rendered as a `Chords:` hint in the verse.
    pub chords: Option<&'a str>,
    /// Rendered as a `Vocals:` hint in the verse.
    pub vocal: Option<&'a str>,
}

/// One `[NAME]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    pub name: &'static str,
    pub lines: Vec<String>,
}

impl SectionBlock {
    pub fn render(&self) -> String {
        let mut out = format!("[{}]", self.name);
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

/// All five blocks in song order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    pub blocks: Vec<SectionBlock>,
}

impl Sections {
    /// Blocks separated by blank lines.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(SectionBlock::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Builds INTRO, VERSE, CHORUS, BRIDGE and OUTRO.
///
/// Each block draws one template and fills `{inst}`/`{inst2}` with two
/// different instruments from `input.instruments` where possible, so the
/// header's instruments reappear in the body.
pub fn build_all_sections(input: &SectionInput<'_>, rng: &mut dyn RandomSource) -> Sections {
    let templates = section_templates(input.family);
    let plan: [(&'static str, &'static [&'static str]); 5] = [
        ("INTRO", templates.intro),
        ("VERSE", templates.verse),
        ("CHORUS", templates.chorus),
        ("BRIDGE", templates.bridge),
        ("OUTRO", templates.outro),
    ];

    let blocks = plan
        .into_iter()
        .map(|(name, options)| {
            let template = pick(rng, options).copied().unwrap_or("{inst}");
            let (inst, inst2) = instrument_pair(input.instruments, rng);
            let mut lines = vec![fill(template, inst, inst2, input.mood)];
            if name == "VERSE" {
                if let Some(vocal) = input.vocal.filter(|v| !v.is_empty()) {
                    lines.push(format!("Vocals: {}", vocal));
                }
                if let Some(chords) = input.chords.filter(|c| !c.is_empty()) {
                    lines.push(format!("Chords: {}", chords));
                }
            }
            SectionBlock { name, lines }
        })
        .collect();

    Sections { blocks }
}

fn instrument_pair<'a>(instruments: &'a [String], rng: &mut dyn RandomSource) -> (&'a str, &'a str) {
    match instruments.len() {
        0 => (FALLBACK_INSTRUMENT, FALLBACK_INSTRUMENT),
        1 => (&instruments[0], &instruments[0]),
        len => {
            let first = rng.index(len);
            let offset = 1 + rng.index(len - 1);
            (&instruments[first], &instruments[(first + offset) % len])
        }
    }
}

fn fill(template: &str, inst: &str, inst2: &str, mood: &str) -> String {
    let line = template
        .replace("{inst2}", inst2)
        .replace("{inst}", inst)
        .replace("{mood}", &mood.to_lowercase());
    capitalize_first(&line)
}

pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
