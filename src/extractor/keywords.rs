// file: src/extractor/keywords.rs
// description: vocabulary-based keyword extraction from free text
// reference: substring matching against a fixed term list

use crate::extractor::patterns::{CHARACTERISTIC_TERMS, MAX_KEYWORDS};

pub struct KeywordExtractor {
    vocabulary: Vec<String>,
    limit: usize,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self::with_vocabulary(CHARACTERISTIC_TERMS.iter().map(|t| t.to_string()).collect())
    }

    pub fn with_vocabulary(vocabulary: Vec<String>) -> Self {
        Self {
            vocabulary: vocabulary.into_iter().map(|t| t.to_lowercase()).collect(),
            limit: MAX_KEYWORDS,
        }
    }

    /// Vocabulary terms contained in `text`, case-insensitively, at most five.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        let mut found: Vec<String> = Vec::new();

        for term in &self.vocabulary {
            if found.len() >= self.limit {
                break;
            }
            if !term.is_empty() && haystack.contains(term.as_str()) && !found.contains(term) {
                found.push(term.clone());
            }
        }

        found
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn extract_keywords(text: &str) -> Vec<String> {
    KeywordExtractor::new().extract(text)
}
