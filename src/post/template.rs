// file: src/post/template.rs
// description: markdown body template with placeholder substitution
// reference: Internal code standards

use crate::error::{PipelineError, Result};
use crate::extractor::patterns::PLACEHOLDER;
use regex::Captures;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_POST_TEMPLATE: &str = "# {title}{location_suffix}

{description}

## The Past

{name} was once a place beloved by many. How has this place changed over time?

{summary}

### Historical Events

{events}

{historical_images}

## Current State

{current_images}

## Conclusion

We've explored the current state of {name}, a place that was once popular and thriving. While places change with the passage of time, the memories and stories remain.

---

{attribution}
";

pub struct PostTemplate {
    template: String,
}

impl PostTemplate {
    pub fn new() -> Self {
        Self {
            template: DEFAULT_POST_TEMPLATE.to_string(),
        }
    }

    pub fn with_custom_template(template: String) -> Self {
        Self { template }
    }

    /// Loads a template using the same `{placeholder}` names as the default.
    pub fn from_file(path: &Path) -> Result<Self> {
        let template = fs::read_to_string(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        if template.trim().is_empty() {
            return Err(PipelineError::Validation(format!(
                "Post template is empty: {}",
                path.display()
            )));
        }

        Ok(Self::with_custom_template(template))
    }

    /// Substitutes every `{key}` in a single pass, so values containing braces
    /// are never expanded again. Unknown placeholders are left as written.
    pub fn render(&self, values: &HashMap<&str, String>) -> String {
        let rendered = PLACEHOLDER.replace_all(&self.template, |caps: &Captures| {
            values
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        });

        collapse_blank_lines(&rendered)
    }
}

impl Default for PostTemplate {
    fn default() -> Self {
        Self::new()
    }
}

// Empty optional sections leave runs of blank lines behind.
fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut previous_blank = false;

    for line in text.lines() {
        let line = line.trim_end();
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        out.push(line);
        previous_blank = blank;
    }

    let mut joined = out.join("\n").trim().to_string();
    joined.push('\n');
    joined
}
