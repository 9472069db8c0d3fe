// file: src/post/frontmatter.rs
// description: YAML front matter emission and extraction for posts
// reference: https://docs.rs/yaml-rust

use crate::error::{PipelineError, Result};
use yaml_rust::yaml::{Array, Hash};
use yaml_rust::{Yaml, YamlEmitter, YamlLoader};

const FENCE: &str = "---";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub date: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl Frontmatter {
    pub fn to_yaml(&self) -> Result<String> {
        let mut hash = Hash::new();
        hash.insert(key("title"), Yaml::String(self.title.clone()));
        hash.insert(key("date"), Yaml::String(self.date.clone()));
        hash.insert(key("categories"), string_array(&self.categories));
        hash.insert(key("tags"), string_array(&self.tags));

        let mut out = String::new();
        YamlEmitter::new(&mut out)
            .dump(&Yaml::Hash(hash))
            .map_err(|e| PipelineError::Serialization(format!("YAML emit error: {:?}", e)))?;

        // the emitter opens the document with its own "---" line
        Ok(out.trim_start_matches(FENCE).trim_start_matches('\n').to_string())
    }

    /// Full markdown document: fenced front matter followed by `body`.
    pub fn render_document(&self, body: &str) -> Result<String> {
        Ok(format!(
            "{fence}\n{yaml}\n{fence}\n\n{body}\n",
            fence = FENCE,
            yaml = self.to_yaml()?,
            body = body.trim_end()
        ))
    }
}

pub struct FrontmatterParser;

impl FrontmatterParser {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, content: &str, file: &str) -> Result<Option<(Frontmatter, String)>> {
        if !content.starts_with(FENCE) {
            return Ok(None);
        }

        let parts: Vec<&str> = content.splitn(3, FENCE).collect();

        if parts.len() < 3 {
            return Ok(None);
        }

        let yaml_content = parts[1].trim();
        let remaining_content = parts[2].trim();

        let docs = YamlLoader::load_from_str(yaml_content).map_err(|e| {
            PipelineError::FrontMatter {
                file: file.to_string(),
                message: format!("YAML parse error: {}", e),
            }
        })?;

        let Some(doc) = docs.into_iter().next() else {
            return Ok(None);
        };

        if !matches!(doc, Yaml::Hash(_)) {
            return Err(PipelineError::FrontMatter {
                file: file.to_string(),
                message: "front matter is not a mapping".to_string(),
            });
        }

        let frontmatter = Frontmatter {
            title: scalar(&doc["title"]).unwrap_or_default(),
            date: scalar(&doc["date"]).unwrap_or_default(),
            categories: string_list(&doc["categories"]),
            tags: string_list(&doc["tags"]),
        };

        Ok(Some((frontmatter, remaining_content.to_string())))
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

fn key(name: &str) -> Yaml {
    Yaml::String(name.to_string())
}

fn string_array(values: &[String]) -> Yaml {
    Yaml::Array(values.iter().cloned().map(Yaml::String).collect::<Array>())
}

fn scalar(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

// Accepts both a YAML list and a single scalar.
fn string_list(value: &Yaml) -> Vec<String> {
    match value {
        Yaml::Array(items) => items.iter().filter_map(scalar).collect(),
        other => scalar(other).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Frontmatter {
        Frontmatter {
            title: "The Current State of Bodie".to_string(),
            date: "2024-01-01 09:30:00".to_string(),
            categories: vec!["Place Exploration".to_string()],
            tags: vec![
                "Bodie".to_string(),
                "abandoned places".to_string(),
                "California, USA".to_string(),
            ],
        }
    }

    #[test]
    fn test_render_document_layout() {
        let document = sample().render_document("# Body\n\nText\n\n").unwrap();

        assert!(document.starts_with("---\ntitle: The Current State of Bodie\n"));
        assert!(document.contains("\n---\n\n# Body\n\nText\n"));
        assert!(document.ends_with("Text\n"));
    }

    #[test]
    fn test_rendered_document_parses_back() {
        let document = sample().render_document("# Body").unwrap();
        let parser = FrontmatterParser::new();

        let (frontmatter, body) = parser.extract(&document, "post.md").unwrap().unwrap();
        assert_eq!(frontmatter, sample());
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_frontmatter_extraction() {
        let parser = FrontmatterParser::new();
        let content = "---\ntitle: Test\ndate: 2024-01-01\ntags: solo\n---\n\n# Content";

        let (frontmatter, remaining) = parser.extract(content, "test.md").unwrap().unwrap();
        assert_eq!(frontmatter.title, "Test");
        assert_eq!(frontmatter.date, "2024-01-01");
        assert_eq!(frontmatter.tags, vec!["solo"]);
        assert!(frontmatter.categories.is_empty());
        assert!(remaining.contains("# Content"));
    }

    #[test]
    fn test_no_frontmatter() {
        let parser = FrontmatterParser::new();
        let result = parser.extract("# Just a heading", "test.md").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_non_mapping_frontmatter_is_error() {
        let parser = FrontmatterParser::new();
        let result = parser.extract("---\n- a\n- b\n---\nbody", "list.md");
        assert!(result.is_err());
    }
}
