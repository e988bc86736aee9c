//! Deterministic song titles.

use tunesmith_registry::phrases::{TITLE_ADJECTIVES, TITLE_NOUNS, TITLE_PATTERNS};

use crate::format::title_case;
use crate::rng::{pick, RandomSource};

/// Builds a title from the title vocabulary and the track's mood.
pub fn generate_title(mood: &str, rng: &mut dyn RandomSource) -> String {
    let pattern = pick(rng, TITLE_PATTERNS).copied().unwrap_or("{adj} {noun}");
    let adjective = pick(rng, TITLE_ADJECTIVES).copied().unwrap_or("Midnight");
    let noun = pick(rng, TITLE_NOUNS).copied().unwrap_or("Avenue");
    let mood = if mood.trim().is_empty() {
        adjective.to_string()
    } else {
        title_case(mood)
    };
    pattern
        .replace("{adj}", adjective)
        .replace("{noun}", noun)
        .replace("{mood}", &mood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SeededRandom, SequenceRandom};

    #[test]
    fn test_first_pattern() {
        let title = generate_title("smoky", &mut SequenceRandom::constant(0.0));
        assert_eq!(title, "Midnight Avenue");
    }

    #[test]
    fn test_mood_pattern_uses_mood() {
        let title = generate_title("smoky", &mut SequenceRandom::constant(0.99));
        assert_eq!(title, "Smoky Static");
    }

    #[test]
    fn test_titles_are_filled() {
        let mut rng = SeededRandom::new(12);
        for _ in 0..50 {
            let title = generate_title("", &mut rng);
            assert!(!title.contains('{'));
            assert!(!title.is_empty());
        }
    }
}
