// file: src/post/description.rs
// description: single-line event descriptions truncated to a length budget
// reference: delimiter, word boundary and hard truncation fallbacks

use crate::extractor::patterns::normalize_whitespace;

pub const DEFAULT_MAX_LENGTH: usize = 200;

const ELLIPSIS: &str = "...";
const DELIMITERS: [&str; 4] = [". ", "! ", "? ", ", "];

/// Renders `text` as one line of at most `max_length` characters. Empty text
/// becomes a generic sentence about `name`.
pub fn generate_event_description(text: &str, name: &str, max_length: usize) -> String {
    let normalized = normalize_whitespace(text);

    if normalized.is_empty() {
        let name = name.trim();
        let fallback = if name.is_empty() {
            "A notable chapter in this place's history.".to_string()
        } else {
            format!("A notable chapter in the history of {}.", name)
        };
        return truncate_description(&fallback, max_length);
    }

    truncate_description(&normalized, max_length)
}

/// Length is measured in chars. Words are only split by the final fallback.
pub fn truncate_description(text: &str, max_length: usize) -> String {
    let text = normalize_whitespace(text);

    if char_len(&text) <= max_length {
        return text;
    }

    truncate_at_delimiter(&text, max_length)
        .or_else(|| truncate_at_word(&text, max_length))
        .unwrap_or_else(|| hard_truncate(&text, max_length))
}

fn truncate_at_delimiter(text: &str, max_length: usize) -> Option<String> {
    for delimiter in DELIMITERS {
        if !text.contains(delimiter) {
            continue;
        }

        let mut result = String::new();
        for segment in text.split(delimiter) {
            if char_len(&result) + char_len(segment) + char_len(delimiter) > max_length {
                break;
            }
            result.push_str(segment);
            result.push_str(delimiter);
        }

        let trimmed = result.trim_end();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    None
}

fn truncate_at_word(text: &str, max_length: usize) -> Option<String> {
    // the trailing space is trimmed before the ellipsis goes on
    let mut result = String::new();

    for word in text.split(' ') {
        if char_len(&result) + char_len(word) + ELLIPSIS.len() > max_length {
            break;
        }
        result.push_str(word);
        result.push(' ');
    }

    let trimmed = result.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("{}{}", trimmed, ELLIPSIS))
    }
}

fn hard_truncate(text: &str, max_length: usize) -> String {
    if max_length <= ELLIPSIS.len() {
        return text.chars().take(max_length).collect();
    }

    let head: String = text.chars().take(max_length - ELLIPSIS.len()).collect();
    format!("{}{}", head, ELLIPSIS)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WAR: &str = "A very long sentence about the war that destroyed the city in 1944 \
        and caused evacuation of all residents nearby";

    #[test]
    fn test_short_text_is_normalized_only() {
        assert_eq!(
            generate_event_description("  Founded\n in   1900. ", "Bodie", 200),
            "Founded in 1900."
        );
    }

    #[test]
    fn test_word_boundary_example() {
        let description = generate_event_description(WAR, "City", 40);

        assert!(description.chars().count() <= 40);
        assert!(description.ends_with("..."));
        assert_eq!(description, "A very long sentence about the war...");
    }

    #[test]
    fn test_word_that_fits_exactly_is_kept() {
        assert_eq!(truncate_description("abc de fghijk", 9), "abc de...");

        let description =
            truncate_description("A very long sentence about the war that destroyed", 42);
        assert_eq!(description, "A very long sentence about the war that...");
        assert_eq!(description.chars().count(), 42);
    }

    #[test]
    fn test_delimiter_truncation_keeps_whole_sentences() {
        let text = "The town boomed in 1877. Gold ran out by 1915. A fire in 1932 finished it off for good.";
        let description = generate_event_description(text, "Bodie", 50);

        assert_eq!(description, "The town boomed in 1877. Gold ran out by 1915.");
    }

    #[test]
    fn test_comma_delimiter_used_last() {
        let text = "Built on a hilltop, shaken by landslides, emptied by the government in the sixties";
        let description = truncate_description(text, 45);

        assert_eq!(description, "Built on a hilltop, shaken by landslides,");
    }

    #[test]
    fn test_hard_truncation_for_single_long_token() {
        let token = "x".repeat(50);
        let description = truncate_description(&token, 10);

        assert_eq!(description, "xxxxxxx...");
    }

    #[test]
    fn test_output_never_exceeds_budget() {
        let inputs = [
            WAR.to_string(),
            "Short. Sentences! Everywhere? Yes, indeed, many of them. More follow here.".to_string(),
            "Ünïcödé wörds with àccents, spread across a fairly long line of text".to_string(),
            "a".repeat(300),
            format!("{} {}", "word".repeat(20), "tail"),
        ];

        for input in &inputs {
            for max_length in 4..=80 {
                let output = truncate_description(input, max_length);
                assert!(
                    output.chars().count() <= max_length,
                    "{:?} exceeded {} chars",
                    output,
                    max_length
                );
            }
        }
    }

    #[test]
    fn test_truncation_is_idempotent() {
        for max_length in [4, 12, 40, 200] {
            let once = generate_event_description(WAR, "City", max_length);
            let twice = generate_event_description(&once, "City", max_length);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_empty_text_falls_back_to_name() {
        assert_eq!(
            generate_event_description(" \n ", "Craco", DEFAULT_MAX_LENGTH),
            "A notable chapter in the history of Craco."
        );
    }

    #[test]
    fn test_tiny_budget() {
        assert_eq!(truncate_description("abcdef", 2), "ab");
    }
}
