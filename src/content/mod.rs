//! Content module - front-matter, records, collection and markdown

mod frontmatter;
pub mod loader;
mod markdown;
mod record;
pub mod sections;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use record::{title_from_slug, CollectionDefaults, ContentRecord};
pub use sections::Sections;
