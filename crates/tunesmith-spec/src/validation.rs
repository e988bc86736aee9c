//! Request validation.
//!
//! Validation runs before any generation work. Errors reject the request;
//! warnings are carried into the trace and otherwise ignored.

use std::collections::BTreeSet;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::model::split_genre_override;
use crate::request::{GenerationRequest, MAX_DESCRIPTION_CHARS, MAX_GENRE_COMPONENTS};

/// Environment a request is validated against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Every genre id the registry knows.
    pub known_genres: &'a [&'a str],
    /// Character budget of the serialized prompt.
    pub max_chars: usize,
    /// Whether an LLM provider is configured for this call.
    pub provider_configured: bool,
}

/// Validates a generation request.
///
/// # Example
/// ```
/// use tunesmith_spec::{GenerationRequest, MAX_CHARS};
/// use tunesmith_spec::validation::{validate_request, ValidationContext};
///
/// let request = GenerationRequest::builder("smooth jazz night session").build();
/// let ctx = ValidationContext {
///     known_genres: &["jazz", "rock"],
///     max_chars: MAX_CHARS,
///     provider_configured: false,
/// };
/// assert!(validate_request(&request, &ctx).is_ok());
/// ```
pub fn validate_request(request: &GenerationRequest, ctx: &ValidationContext<'_>) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_description(request, &mut result);
    validate_genre_override(request, ctx, &mut result);
    validate_locked_phrase(request, ctx, &mut result);
    validate_modes(request, ctx, &mut result);

    result
}

fn validate_description(request: &GenerationRequest, result: &mut ValidationResult) {
    let description = request.description.trim();
    if description.is_empty() && request.genre_override().is_none() {
        result.add_error(ValidationError::with_field(
            ErrorCode::EmptyDescription,
            "description is empty and no genre override was given",
            "description",
        ));
    }

    let len = request.description.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        result.add_error(ValidationError::with_field(
            ErrorCode::DescriptionTooLong,
            format!(
                "description is {} characters, at most {} are accepted",
                len, MAX_DESCRIPTION_CHARS
            ),
            "description",
        ));
    }
}

fn validate_genre_override(
    request: &GenerationRequest,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    let Some(raw) = request.genre_override() else {
        return;
    };

    let matched: BTreeSet<String> = split_genre_override(raw)
        .into_iter()
        .filter(|token| ctx.known_genres.contains(&token.as_str()))
        .collect();

    if matched.is_empty() {
        result.add_warning(ValidationWarning::with_field(
            WarningCode::UnknownGenreOverride,
            format!("genre override '{}' matches no known genre", raw),
            "genre_override",
        ));
    } else if matched.len() > MAX_GENRE_COMPONENTS {
        result.add_error(ValidationError::with_field(
            ErrorCode::TooManyGenres,
            format!(
                "{} genres given, at most {} can be blended",
                matched.len(),
                MAX_GENRE_COMPONENTS
            ),
            "genre_override",
        ));
    }
}

fn validate_locked_phrase(
    request: &GenerationRequest,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    let Some(phrase) = request.locked_phrase() else {
        return;
    };
    let limit = ctx.max_chars / 3;
    let len = phrase.chars().count();
    if len > limit {
        result.add_error(ValidationError::with_field(
            ErrorCode::LockedPhraseTooLong,
            format!("locked phrase is {} characters, at most {} fit", len, limit),
            "locked_phrase",
        ));
    }
}

fn validate_modes(
    request: &GenerationRequest,
    ctx: &ValidationContext<'_>,
    result: &mut ValidationResult,
) {
    if request.lyrics_mode && request.max_mode {
        result.add_error(ValidationError::new(
            ErrorCode::ConflictingOptions,
            "lyrics mode cannot be combined with MAX mode",
        ));
    }
    if request.lyrics_mode && !ctx.provider_configured {
        result.add_warning(ValidationWarning::with_field(
            WarningCode::LyricsWithoutProvider,
            "lyrics need an LLM provider; none is configured",
            "lyrics_mode",
        ));
    }
}
