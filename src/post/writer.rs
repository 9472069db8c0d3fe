// file: src/post/writer.rs
// description: writes rendered posts to the posts directory and lists existing ones
// reference: https://docs.rs/walkdir

use crate::error::{PipelineError, Result};
use crate::post::frontmatter::{Frontmatter, FrontmatterParser};
use crate::post::renderer::RenderedPost;
use crate::utils::Validator;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct PostWriter {
    posts_dir: PathBuf,
}

/// A post already on disk.
#[derive(Debug, Clone)]
pub struct ExistingPost {
    pub path: PathBuf,
    pub filename: String,
    pub frontmatter: Frontmatter,
}

impl PostWriter {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.posts_dir.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.target_path(filename).exists()
    }

    /// Returns `None` without touching the file when it already exists.
    pub fn write(&self, post: &RenderedPost) -> Result<Option<PathBuf>> {
        fs::create_dir_all(&self.posts_dir).map_err(|source| PipelineError::FileOperation {
            path: self.posts_dir.clone(),
            source,
        })?;

        let path = self.target_path(&post.filename);
        let document = post.to_markdown()?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("{} already exists. Skipping.", path.display());
                return Ok(None);
            }
            Err(source) => return Err(PipelineError::FileOperation { path, source }),
        };

        file.write_all(document.as_bytes())
            .map_err(|source| PipelineError::FileOperation {
                path: path.clone(),
                source,
            })?;

        info!("Post created successfully: {}", path.display());
        Ok(Some(path))
    }

    /// Posts with readable front matter, sorted by filename. A missing
    /// directory means no posts yet.
    pub fn list_posts(&self) -> Result<Vec<ExistingPost>> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }
        Validator::validate_directory(&self.posts_dir)?;

        let parser = FrontmatterParser::new();
        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || Validator::validate_markdown_extension(path).is_err() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().to_string();
            let content = fs::read_to_string(path).map_err(|source| {
                PipelineError::FileOperation {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

            match parser.extract(&content, &filename) {
                Ok(Some((frontmatter, _))) => posts.push(ExistingPost {
                    path: path.to_path_buf(),
                    filename,
                    frontmatter,
                }),
                Ok(None) => debug!("No front matter in {}", path.display()),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        posts.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(posts)
    }
}
