// file: src/extractor/events.rs
// description: historical event sentence extraction from encyclopedia text
// reference: sentence splitting and keyword filtering

use crate::extractor::patterns::{
    HISTORICAL_KEYWORDS, MAX_EVENTS, MIN_SENTENCE_LENGTH, SENTENCE_BOUNDARY, normalize_whitespace,
};

pub struct EventExtractor {
    keywords: Vec<String>,
    min_sentence_length: usize,
    limit: usize,
}

impl EventExtractor {
    pub fn new() -> Self {
        Self {
            keywords: HISTORICAL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            min_sentence_length: MIN_SENTENCE_LENGTH,
            limit: MAX_EVENTS,
        }
    }

    pub fn with_min_sentence_length(mut self, min_sentence_length: usize) -> Self {
        self.min_sentence_length = min_sentence_length;
        self
    }

    /// Sentences longer than the minimum that mention `subject` and at least
    /// one historical keyword, in text order, at most five.
    pub fn extract(&self, full_text: &str, subject: &str) -> Vec<String> {
        let subject = subject.trim().to_lowercase();
        if subject.is_empty() {
            return Vec::new();
        }

        let mut events: Vec<String> = Vec::new();

        for sentence in split_sentences(full_text) {
            if events.len() >= self.limit {
                break;
            }

            if sentence.chars().count() <= self.min_sentence_length {
                continue;
            }

            let lower = sentence.to_lowercase();
            if !lower.contains(&subject) {
                continue;
            }

            if self.keywords.iter().any(|k| lower.contains(k.as_str()))
                && !events.contains(&sentence)
            {
                events.push(sentence);
            }
        }

        events
    }
}

impl Default for EventExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits on `.`, `!` and `?`, normalizing whitespace and dropping empties.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(normalize_whitespace)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn extract_historical_events(full_text: &str, subject: &str) -> Vec<String> {
    EventExtractor::new().extract(full_text, subject)
}
