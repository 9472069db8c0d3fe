// file: src/post/slug.rs
// description: url-safe slugs and dated post filenames
// reference: jekyll _posts naming convention

use crate::extractor::patterns::{SLUG_INVALID, SLUG_SEPARATOR};
use chrono::NaiveDate;

pub fn slugify(title: &str) -> String {
    let cleaned = SLUG_INVALID.replace_all(title, "");
    let hyphenated = SLUG_SEPARATOR.replace_all(cleaned.trim(), "-");
    let slug = hyphenated.trim_matches('-').to_lowercase();

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// `<YYYY-MM-DD>-<slug>.md`
pub fn post_filename(date: NaiveDate, title: &str) -> String {
    format!("{}-{}.md", date.format("%Y-%m-%d"), slugify(title))
}
