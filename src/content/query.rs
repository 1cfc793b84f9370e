//! Published post listings
//!
//! Every listing re-reads the content directory, so results always reflect
//! what is on disk at call time.

use std::collections::HashMap;

use super::loader::PostLoader;
use super::Post;

impl PostLoader {
    /// Published posts, newest first
    pub fn all_published(&self) -> Vec<Post> {
        published_newest_first(self.load_all())
    }

    /// Published posts whose category matches `category`, ignoring case
    pub fn by_category(&self, category: &str) -> Vec<Post> {
        self.all_published()
            .into_iter()
            .filter(|post| post.in_category(category))
            .collect()
    }

    /// Published posts carrying `tag`, ignoring case
    pub fn by_tag(&self, tag: &str) -> Vec<Post> {
        self.all_published()
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect()
    }

    /// Number of published posts per tag
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        count_by(&self.all_published(), |post| post.tags.clone())
    }

    /// Number of published posts per category
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        count_by(&self.all_published(), |post| vec![post.category.clone()])
    }
}

/// Drop unpublished posts and sort by date descending.
///
/// The sort is stable: posts sharing a date keep their input order.
pub fn published_newest_first<I>(posts: I) -> Vec<Post>
where
    I: IntoIterator<Item = Post>,
{
    let mut posts: Vec<Post> = posts.into_iter().filter(|p| p.published).collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}

/// Count posts per key, most frequent first, ties by name
fn count_by<F>(posts: &[Post], keys: F) -> Vec<(String, usize)>
where
    F: Fn(&Post) -> Vec<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for key in keys(post) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &TempDir, slug: &str, date: &str, published: bool, category: &str, tags: &[&str]) {
        let tags = tags
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ");
        let content = format!(
            "---\ntitle: \"{slug}\"\ndate: \"{date}\"\nauthor: \"Jane\"\ncategory: \"{category}\"\ntags: [{tags}]\npublished: {published}\n---\nBody\n"
        );
        fs::write(dir.path().join(format!("{}.mdx", slug)), content).unwrap();
    }

    fn loader(dir: &TempDir) -> PostLoader {
        PostLoader::new(dir.path(), vec!["mdx".to_string()])
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_all_published_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "january", "2025-01-01", true, "MCP", &["a"]);
        write_post(&dir, "june", "2025-06-01", false, "MCP", &["a"]);
        write_post(&dir, "march", "2025-03-01", true, "MCP", &["a"]);

        let posts = loader(&dir).all_published();
        assert_eq!(slugs(&posts), vec!["march", "january"]);
        assert!(posts.iter().all(|p| p.published));
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_all_published_skips_broken_files() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "ok", "2025-01-01", true, "MCP", &["a"]);
        fs::write(dir.path().join("bad.mdx"), "---\ndate: [\n---\n").unwrap();

        assert_eq!(slugs(&loader(&dir).all_published()), vec!["ok"]);
    }

    #[test]
    fn test_reflects_changes_between_calls() {
        let dir = TempDir::new().unwrap();
        let loader = loader(&dir);
        write_post(&dir, "one", "2025-01-01", true, "MCP", &["a"]);
        assert_eq!(loader.all_published().len(), 1);

        write_post(&dir, "two", "2025-02-01", true, "MCP", &["a"]);
        assert_eq!(slugs(&loader.all_published()), vec!["two", "one"]);

        fs::remove_file(dir.path().join("one.mdx")).unwrap();
        assert_eq!(slugs(&loader.all_published()), vec!["two"]);
    }

    #[test]
    fn test_by_category_and_tag() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "infra", "2025-01-01", true, "Infrastructure", &["CDK", "aws"]);
        write_post(&dir, "mcp", "2025-02-01", true, "MCP", &["servers"]);
        write_post(&dir, "hidden", "2025-03-01", false, "MCP", &["cdk"]);

        let loader = loader(&dir);
        assert_eq!(slugs(&loader.by_category("mcp")), vec!["mcp"]);
        assert_eq!(slugs(&loader.by_category("INFRASTRUCTURE")), vec!["infra"]);
        assert!(loader.by_category("infra").is_empty());
        assert_eq!(slugs(&loader.by_tag("cdk")), vec!["infra"]);
        assert!(loader.by_tag("missing").is_empty());
    }

    #[test]
    fn test_counts() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "a", "2025-01-01", true, "MCP", &["rust", "aws"]);
        write_post(&dir, "b", "2025-02-01", true, "Bedrock", &["aws"]);
        write_post(&dir, "c", "2025-03-01", false, "Bedrock", &["aws"]);

        let loader = loader(&dir);
        assert_eq!(
            loader.tag_counts(),
            vec![("aws".to_string(), 2), ("rust".to_string(), 1)]
        );
        assert_eq!(
            loader.category_counts(),
            vec![("Bedrock".to_string(), 1), ("MCP".to_string(), 1)]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        let make = |slug: &str| Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            date,
            author: "A".to_string(),
            excerpt: String::new(),
            category: "MCP".to_string(),
            tags: vec!["t".to_string()],
            published: true,
            content: String::new(),
        };

        let posts = published_newest_first(vec![make("x"), make("a"), make("m")]);
        assert_eq!(slugs(&posts), vec!["x", "a", "m"]);
    }
}
