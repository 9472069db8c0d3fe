// file: src/models/image.rs
// description: image search result model
// reference: https://developers.google.com/custom-search/v1/reference/rest/v1/Search

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResult {
    pub url: String,
    pub title: String,
    pub thumbnail: String,
    pub context: String,
}

impl ImageResult {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Title flattened to one line, safe to wrap in `*...*`.
    pub fn caption(&self) -> String {
        self.title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace('*', "\\*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_is_single_line() {
        let image = ImageResult::new("https://example.com/a.jpg", "Old\n  *mill*  ruins");
        assert_eq!(image.caption(), "Old \\*mill\\* ruins");
    }
}
