// file: src/post/mod.rs
// description: post assembly module exports
// reference: internal module structure

pub mod description;
pub mod frontmatter;
pub mod renderer;
pub mod slug;
pub mod template;
pub mod writer;

pub use description::{DEFAULT_MAX_LENGTH, generate_event_description, truncate_description};
pub use frontmatter::{Frontmatter, FrontmatterParser};
pub use renderer::{PostInputs, PostRenderer, RenderedPost};
pub use slug::{post_filename, slugify};
pub use template::PostTemplate;
pub use writer::{ExistingPost, PostWriter};
