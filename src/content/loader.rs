//! Content loader - loads posts from the content directory

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::post::FieldError;
use super::{FrontMatter, FrontMatterError, Post};
use crate::config::BlogConfig;

/// Why a post could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no post named `{0}`")]
    NotFound(String),

    #[error("`{0}` is not a valid slug")]
    InvalidSlug(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Loads posts from a single content directory
///
/// Nothing is cached: every call goes back to the filesystem.
#[derive(Debug, Clone)]
pub struct PostLoader {
    content_dir: PathBuf,
    extensions: Vec<String>,
}

impl PostLoader {
    /// Create a loader over `content_dir` accepting files with the given extensions
    pub fn new<P: Into<PathBuf>>(content_dir: P, extensions: Vec<String>) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            content_dir: content_dir.into(),
            extensions,
        }
    }

    /// Create a loader from site configuration, resolving the content directory against `base_dir`
    pub fn from_config(base_dir: &Path, config: &BlogConfig) -> Self {
        Self::new(base_dir.join(&config.content_dir), config.extensions.clone())
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Slugs of every post file directly inside the content directory.
    ///
    /// An unreadable directory yields an empty set.
    pub fn list_slugs(&self) -> BTreeSet<String> {
        self.read_slugs().unwrap_or_else(|e| {
            tracing::warn!("Failed to read posts directory: {}", e);
            BTreeSet::new()
        })
    }

    fn read_slugs(&self) -> Result<BTreeSet<String>, LoadError> {
        let dir_error = |source| LoadError::Io {
            path: self.content_dir.clone(),
            source,
        };
        let meta = fs::metadata(&self.content_dir).map_err(dir_error)?;
        if !meta.is_dir() {
            return Err(dir_error(std::io::Error::other("not a directory")));
        }

        let mut slugs = BTreeSet::new();
        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(dir_error(e.into())),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() {
                if let Some(slug) = self.slug_for(entry.path()) {
                    slugs.insert(slug);
                }
            }
        }

        Ok(slugs)
    }

    /// Load one post, or `None` when it is missing or cannot be parsed
    pub fn load(&self, slug: &str) -> Option<Post> {
        match self.try_load(slug) {
            Ok(post) => Some(post),
            Err(LoadError::NotFound(_)) => {
                tracing::debug!("Post {} not found in {:?}", slug, self.content_dir);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load post {}: {}", slug, e);
                None
            }
        }
    }

    /// Load one post, reporting why it failed
    pub fn try_load(&self, slug: &str) -> Result<Post, LoadError> {
        if !is_valid_slug(slug) {
            return Err(LoadError::InvalidSlug(slug.to_string()));
        }

        let path = self
            .path_for(slug)
            .ok_or_else(|| LoadError::NotFound(slug.to_string()))?;
        let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        let (fm, body) = FrontMatter::parse(&content)?;
        let post = Post::from_front_matter(slug, &fm, body)?;
        tracing::debug!("Loaded post {} from {:?}", slug, path);
        Ok(post)
    }

    /// Every post that loads, in slug enumeration order.
    ///
    /// Broken files are skipped with a warning instead of failing the listing.
    pub fn load_all(&self) -> Vec<Post> {
        self.list_slugs()
            .iter()
            .filter_map(|slug| self.load(slug))
            .collect()
    }

    /// Path of the first existing file for `slug`, in extension order
    pub fn path_for(&self, slug: &str) -> Option<PathBuf> {
        if !is_valid_slug(slug) {
            return None;
        }
        self.extensions
            .iter()
            .map(|ext| self.content_dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
    }

    fn slug_for(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;
        if !self.extensions.iter().any(|e| e == ext) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        is_valid_slug(stem).then(|| stem.to_string())
    }
}

/// A slug names a file inside the content directory and nothing else
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn post_file(title: &str, date: &str) -> String {
        format!(
            "---\ntitle: \"{}\"\ndate: \"{}\"\nauthor: \"Jane\"\ncategory: \"MCP\"\ntags: [\"mcp\"]\npublished: true\n---\n\nBody of {}.\n",
            title, date, title
        )
    }

    fn loader(dir: &TempDir) -> PostLoader {
        PostLoader::new(dir.path(), vec!["mdx".to_string(), ".md".to_string()])
    }

    #[test]
    fn test_list_slugs_filters_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("first.mdx"), post_file("First", "2025-01-01")).unwrap();
        fs::write(dir.path().join("second.md"), post_file("Second", "2025-01-02")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        fs::create_dir(dir.path().join("drafts.mdx")).unwrap();

        let slugs = loader(&dir).list_slugs();
        let slugs: Vec<_> = slugs.iter().map(String::as_str).collect();
        assert_eq!(slugs, vec!["first", "second"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let loader = PostLoader::new(dir.path().join("nope"), vec!["mdx".to_string()]);
        assert!(loader.list_slugs().is_empty());
        assert!(loader.load_all().is_empty());
    }

    #[test]
    fn test_content_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts");
        fs::write(&path, "not a directory").unwrap();

        let loader = PostLoader::new(&path, vec!["mdx".to_string()]);
        assert!(matches!(loader.read_slugs(), Err(LoadError::Io { .. })));
        assert!(loader.list_slugs().is_empty());
    }

    #[test]
    fn test_load_post() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.mdx"), post_file("Hello", "2025-10-22")).unwrap();

        let post = loader(&dir).load("hello").unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "\nBody of Hello.\n");
    }

    #[test]
    fn test_first_extension_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("dup.mdx"), post_file("From mdx", "2025-01-01")).unwrap();
        fs::write(dir.path().join("dup.md"), post_file("From md", "2025-01-01")).unwrap();

        let loader = loader(&dir);
        assert_eq!(loader.list_slugs().len(), 1);
        assert_eq!(loader.load("dup").unwrap().title, "From mdx");
    }

    #[test]
    fn test_load_not_found() {
        let dir = TempDir::new().unwrap();
        let loader = loader(&dir);
        assert!(loader.load("missing").is_none());
        assert!(matches!(loader.try_load("missing"), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_rejects_path_slugs() {
        let dir = TempDir::new().unwrap();
        let loader = loader(&dir);
        for slug in ["", "..", "../secret", "a/b", "a\\b"] {
            assert!(
                matches!(loader.try_load(slug), Err(LoadError::InvalidSlug(_))),
                "slug {:?} should be rejected",
                slug
            );
        }
    }

    #[test]
    fn test_malformed_post_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.mdx"), post_file("Good", "2025-01-01")).unwrap();
        fs::write(dir.path().join("broken.mdx"), "---\ntitle: [oops\n---\n").unwrap();
        fs::write(dir.path().join("open.mdx"), "---\ntitle: \"No end\"\n").unwrap();

        let loader = loader(&dir);
        assert!(matches!(loader.try_load("broken"), Err(LoadError::FrontMatter(_))));
        assert!(matches!(
            loader.try_load("open"),
            Err(LoadError::FrontMatter(FrontMatterError::Unterminated))
        ));

        let posts = loader.load_all();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }
}
