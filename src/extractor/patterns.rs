// file: src/extractor/patterns.rs
// description: vocabularies and compiled regex patterns for text extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

pub const MAX_KEYWORDS: usize = 5;
pub const MAX_EVENTS: usize = 5;
pub const MIN_SENTENCE_LENGTH: usize = 30;

/// Terms that characterize a place and make useful image search refinements.
pub const CHARACTERISTIC_TERMS: &[&str] = &[
    "abandoned",
    "ghost town",
    "town",
    "city",
    "village",
    "island",
    "factory",
    "industrial",
    "mining",
    "mine",
    "gold",
    "diamond",
    "resort",
    "tourist",
    "nuclear",
    "disaster",
    "desert",
    "ruins",
    "memorial",
    "heritage",
    "medieval",
    "soviet",
    "railway",
    "harbor",
];

/// Substrings that mark a sentence as describing a historical event.
pub const HISTORICAL_KEYWORDS: &[&str] = &[
    "founded",
    "established",
    "built",
    "constructed",
    "war",
    "battle",
    "disaster",
    "destroyed",
    "evacuat",
    "abandon",
    "collapse",
    "fire",
    "earthquake",
    "flood",
    "explosion",
    "accident",
    "massacre",
    "occupied",
    "invasion",
    "closed",
    "declined",
    "boom",
    "century",
    "rebuilt",
];

lazy_static! {
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("WHITESPACE regex is valid");

    pub static ref SENTENCE_BOUNDARY: Regex =
        Regex::new(r"[.!?]").expect("SENTENCE_BOUNDARY regex is valid");

    // Plain-text encyclopedia extracts keep "== History ==" style headings
    pub static ref SECTION_HEADING: Regex = Regex::new(
        r"(?m)^[ \t]*={2,}[^=\n]*={2,}[ \t]*$"
    ).expect("SECTION_HEADING regex is valid");

    pub static ref SLUG_INVALID: Regex =
        Regex::new(r"[^\w\s-]").expect("SLUG_INVALID regex is valid");

    pub static ref SLUG_SEPARATOR: Regex =
        Regex::new(r"[-\s]+").expect("SLUG_SEPARATOR regex is valid");

    pub static ref PLACEHOLDER: Regex =
        Regex::new(r"\{([a-z_]+)\}").expect("PLACEHOLDER regex is valid");
}

/// Collapses every whitespace run (newlines included) to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

pub fn strip_section_headings(text: &str) -> String {
    SECTION_HEADING.replace_all(text, "").into_owned()
}
