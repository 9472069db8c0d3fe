// file: src/models/enrichment.rs
// description: encyclopedia-derived context attached to a post
// reference: internal data structures

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentInfo {
    pub summary: String,
    pub keywords: Vec<String>,
    pub full_text: String,
    pub historical_events: Vec<String>,
}

impl EnrichmentInfo {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.full_text.is_empty()
            && self.keywords.is_empty()
            && self.historical_events.is_empty()
    }
}
