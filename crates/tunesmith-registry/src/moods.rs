//! Mood categories detected from descriptions.

/// A mood category with its trigger words and mood vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodCategory {
    pub name: &'static str,
    /// Lowercase trigger words, matched on word boundaries.
    pub keywords: &'static [&'static str],
    pub moods: &'static [&'static str],
}

pub const MOOD_CATEGORIES: &[MoodCategory] = &[
    MoodCategory {
        name: "melancholic",
        keywords: &["sad", "melancholy", "melancholic", "lonely", "heartbreak", "rainy", "grief"],
        moods: &["melancholic", "wistful", "bittersweet", "somber"],
    },
    MoodCategory {
        name: "energetic",
        keywords: &["energetic", "upbeat", "party", "dance", "workout", "hype"],
        moods: &["energetic", "driving", "euphoric", "uplifting"],
    },
    MoodCategory {
        name: "calm",
        keywords: &["calm", "relaxing", "chill", "peaceful", "sleep", "study", "soothing"],
        moods: &["calm", "serene", "dreamy", "mellow"],
    },
    MoodCategory {
        name: "dark",
        keywords: &["dark", "ominous", "horror", "sinister", "haunted"],
        moods: &["dark", "brooding", "ominous", "tense"],
    },
    MoodCategory {
        name: "romantic",
        keywords: &["love", "romantic", "tender", "wedding"],
        moods: &["romantic", "tender", "intimate", "warm"],
    },
    MoodCategory {
        name: "epic",
        keywords: &["epic", "heroic", "battle", "victory", "adventure"],
        moods: &["epic", "triumphant", "heroic", "soaring"],
    },
    MoodCategory {
        name: "happy",
        keywords: &["happy", "joyful", "sunny", "summer", "cheerful"],
        moods: &["joyful", "sunny", "carefree", "bright"],
    },
];

