//! Tunesmith Engine
//!
//! Deterministic, seed-reproducible assembly of style prompts from the
//! registry tables.
//!
//! Given the same [`GenerationRequest`](tunesmith_spec::GenerationRequest)
//! and seed, [`generate`] always returns the same text. The LLM path in
//! `tunesmith-llm` reuses [`assemble`] for its context and falls back to
//! [`Assembly::render`] when the model is unavailable.
//!
//! # Example
//!
//! ```
//! use tunesmith_engine::{generate, AssemblyOptions, SeededRandom};
//! use tunesmith_spec::{GenerationRequest, TraceCollector, MAX_CHARS};
//!
//! let request = GenerationRequest::builder("smooth jazz night session").build();
//! let mut trace = TraceCollector::default();
//! let prompt = generate(
//!     &request,
//!     &AssemblyOptions::default(),
//!     &mut SeededRandom::new(42),
//!     &mut trace,
//! );
//! assert!(prompt.text.contains("Genre: Jazz"));
//! assert!(prompt.text.chars().count() <= MAX_CHARS);
//! ```

pub mod blending;
pub mod bpm;
pub mod format;
pub mod harmony;
pub mod pipeline;
pub mod resolver;
pub mod rng;
pub mod sections;
pub mod selection;
pub mod style;
pub mod title;
mod unique;

pub use blending::{
    build_production_descriptor, build_vocal_descriptor, select_instruments_for_multi_genre,
};
pub use bpm::{bpm_range_for_genre, resolve_bpm_range, BpmResolution, BpmSource};
pub use format::{
    fit_with_locked_phrase, format_max, format_standard, truncate_prompt, PromptFields,
    MAX_MODE_HEADER,
};
pub use pipeline::{assemble, generate, Assembly, AssemblyOptions, DeterministicPrompt};
pub use resolver::{detect_genre, detect_mood_category, resolve_genre};
pub use rng::{create_rng, RandomSource, SeededRandom, SequenceRandom};
pub use sections::{build_all_sections, SectionInput, Sections};
pub use selection::{articulate, select_instruments, SelectionOptions};
pub use style::{assemble_style_tags, StyleTags, ENRICHED_TAG_BUDGET, LEAN_TAG_BUDGET};
pub use title::generate_title;
