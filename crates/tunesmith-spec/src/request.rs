//! Generation request and output types.

use serde::{Deserialize, Serialize};

use crate::trace::TraceRun;

/// Hard character budget for a serialized style prompt.
pub const MAX_CHARS: usize = 1000;

/// Maximum number of genre components that can be blended in one request.
pub const MAX_GENRE_COMPONENTS: usize = 4;

/// Maximum accepted description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 4000;

/// Wire format of the serialized prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// Bracket header, labeled fields, and section blocks.
    #[default]
    Standard,
    /// Fixed three-line header followed by quoted key/value fields.
    Max,
}

impl PromptMode {
    /// Returns the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptMode::Standard => "standard",
            PromptMode::Max => "max",
        }
    }
}

impl std::fmt::Display for PromptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Free-text music description.
    pub description: String,
    /// Optional genre override, possibly compound ("jazz rock", "lofi/hiphop").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_override: Option<String>,
    /// Phrase that must appear verbatim in the final prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_phrase: Option<String>,
    /// RNG seed. When absent the caller boundary draws one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Serialize in MAX mode instead of standard mode.
    #[serde(default)]
    pub max_mode: bool,
    /// Also produce lyrics (LLM path only).
    #[serde(default)]
    pub lyrics_mode: bool,
    /// Include style tags and recording lines in standard mode.
    #[serde(default)]
    pub use_suno_tags: bool,
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder(description: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(description)
    }

    /// Returns the prompt mode selected by this request.
    pub fn prompt_mode(&self) -> PromptMode {
        if self.max_mode {
            PromptMode::Max
        } else {
            PromptMode::Standard
        }
    }

    /// Returns the genre override if it is present and non-blank.
    pub fn genre_override(&self) -> Option<&str> {
        non_blank(self.genre_override.as_deref())
    }

    /// Returns the locked phrase if it is present and non-blank.
    pub fn locked_phrase(&self) -> Option<&str> {
        non_blank(self.locked_phrase.as_deref())
    }

    /// Returns a copy of this request with the seed pinned.
    pub fn with_seed(&self, seed: u32) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Builder for [`GenerationRequest`].
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    request: GenerationRequest,
}

impl GenerationRequestBuilder {
    /// Creates a builder with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            request: GenerationRequest {
                description: description.into(),
                ..GenerationRequest::default()
            },
        }
    }

    /// Sets the genre override.
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.request.genre_override = Some(genre.into());
        self
    }

    /// Sets the locked phrase.
    pub fn locked_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.request.locked_phrase = Some(phrase.into());
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.request.seed = Some(seed);
        self
    }

    /// Selects MAX mode.
    pub fn max_mode(mut self, enabled: bool) -> Self {
        self.request.max_mode = enabled;
        self
    }

    /// Requests lyrics.
    pub fn lyrics_mode(mut self, enabled: bool) -> Self {
        self.request.lyrics_mode = enabled;
        self
    }

    /// Includes style tags and recording lines in standard mode.
    pub fn suno_tags(mut self, enabled: bool) -> Self {
        self.request.use_suno_tags = enabled;
        self
    }

    /// Builds the request.
    pub fn build(self) -> GenerationRequest {
        self.request
    }
}

/// Result of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    /// The serialized style prompt, never longer than the character budget.
    pub text: String,
    /// Song title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Lyrics, when requested and available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    /// Decision trace for this call, when tracing is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<TraceRun>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let request = GenerationRequest::builder("late night drive")
            .genre("synthwave")
            .seed(7)
            .max_mode(true)
            .suno_tags(true)
            .build();

        assert_eq!(request.description, "late night drive");
        assert_eq!(request.genre_override(), Some("synthwave"));
        assert_eq!(request.seed, Some(7));
        assert_eq!(request.prompt_mode(), PromptMode::Max);
        assert!(request.use_suno_tags);
        assert!(!request.lyrics_mode);
    }

    #[test]
    fn test_blank_override_and_phrase_are_absent() {
        let request = GenerationRequest::builder("x")
            .genre("   ")
            .locked_phrase("")
            .build();
        assert_eq!(request.genre_override(), None);
        assert_eq!(request.locked_phrase(), None);
    }

    #[test]
    fn test_request_json_uses_camel_case() {
        let request = GenerationRequest::builder("rainy city")
            .genre("jazz rock")
            .lyrics_mode(true)
            .build();
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"genreOverride\":\"jazz rock\""));
        assert!(json.contains("\"lyricsMode\":true"));
        assert!(!json.contains("lockedPhrase"));

        let parsed: GenerationRequest =
            serde_json::from_str(r#"{"description":"calm","maxMode":true}"#).unwrap();
        assert!(parsed.max_mode);
        assert_eq!(parsed.seed, None);
    }

    #[test]
    fn test_with_seed_keeps_other_fields() {
        let request = GenerationRequest::builder("calm").genre("ambient").build();
        let pinned = request.with_seed(99);
        assert_eq!(pinned.seed, Some(99));
        assert_eq!(pinned.genre_override, request.genre_override);
    }
}
