//! Tunesmith Canonical Types Library
//!
//! This crate provides the request/response types, error taxonomy, request
//! validation, canonical hashing and decision-trace types shared by every
//! other Tunesmith crate.
//!
//! # Overview
//!
//! A generation call takes a [`GenerationRequest`] (free-text description plus
//! options), validates it, and returns a [`GenerationOutput`] whose `text` is a
//! length-bounded style prompt. Everything the engine decided along the way is
//! recorded in a [`TraceRun`].
//!
//! # Example
//!
//! ```
//! use tunesmith_spec::{GenerationRequest, MAX_CHARS};
//! use tunesmith_spec::validation::{validate_request, ValidationContext};
//! use tunesmith_spec::hash::canonical_request_hash;
//!
//! let request = GenerationRequest::builder("smooth jazz night session")
//!     .seed(42)
//!     .suno_tags(true)
//!     .build();
//!
//! let ctx = ValidationContext {
//!     known_genres: &["jazz", "rock"],
//!     max_chars: MAX_CHARS,
//!     provider_configured: false,
//! };
//! assert!(validate_request(&request, &ctx).is_ok());
//!
//! let hash = canonical_request_hash(&request).unwrap();
//! println!("Request hash: {}", hash);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Validation error/warning codes and the generation error
//! - [`request`]: Request and output types
//! - [`model`]: Per-generation data (resolved genre, enrichment result)
//! - [`validation`]: Request validation
//! - [`hash`]: Canonical hashing
//! - [`trace`]: Trace events, collector and size-cap compaction

pub mod error;
pub mod hash;
pub mod model;
pub mod request;
pub mod trace;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    ErrorCode, GenerationError, StageError, TunesmithError, ValidationError, ValidationResult,
    ValidationWarning, WarningCode,
};
pub use hash::{blake3_hash_str, canonical_request_hash};
pub use model::{split_genre_override, EnrichmentResult, ResolvedGenre};
pub use request::{
    GenerationOutput, GenerationRequest, GenerationRequestBuilder, PromptMode,
    MAX_CHARS, MAX_DESCRIPTION_CHARS, MAX_GENRE_COMPONENTS,
};
pub use trace::{TraceCollector, TraceEvent, TraceHeader, TraceOptions, TraceRun};
pub use validation::{validate_request, ValidationContext};
