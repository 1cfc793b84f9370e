//! Content module - handles posts and their front-matter

mod frontmatter;
pub mod loader;
mod post;
pub mod query;
pub mod reading_time;

pub use frontmatter::{FrontMatter, FrontMatterError, FrontValue};
pub use loader::{LoadError, PostLoader};
pub use post::{FieldError, Post};
