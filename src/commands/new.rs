//! Create a new post

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::{FrontMatter, FrontValue};
use crate::helpers::iso_date;
use crate::Blog;

/// What to put in a new post's front-matter
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// File name without extension; derived from the title when absent
    pub slug: Option<String>,
    pub date: NaiveDate,
}

/// Front-matter for a new, unpublished post
pub fn scaffold(blog: &Blog, post: &NewPost) -> FrontMatter {
    let category = post
        .category
        .clone()
        .or_else(|| blog.config.categories.first().cloned())
        .unwrap_or_default();
    let tags = if post.tags.is_empty() {
        vec![slug::slugify(&category)]
    } else {
        post.tags.clone()
    };

    let mut fm = FrontMatter::new();
    fm.insert("title", FrontValue::Text(post.title.clone()));
    fm.insert("date", FrontValue::Text(iso_date(&post.date)));
    fm.insert("author", FrontValue::Text(blog.config.author.clone()));
    fm.insert("category", FrontValue::Text(category));
    fm.insert(
        "tags",
        FrontValue::List(tags.into_iter().map(FrontValue::Text).collect()),
    );
    fm.insert("published", FrontValue::Bool(false));
    fm
}

/// Write a new post file, refusing to overwrite or to write invalid front-matter
pub fn create_post(blog: &Blog, post: &NewPost) -> Result<PathBuf> {
    let slug = post
        .slug
        .clone()
        .unwrap_or_else(|| slug::slugify(&post.title));
    if slug.is_empty() || slug.contains(['/', '\\', '.']) {
        anyhow::bail!("Cannot use {:?} as a post file name", slug);
    }

    let fm = scaffold(blog, post);
    let violations = blog.validator().validate(&fm);
    if !violations.is_empty() {
        let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
        anyhow::bail!("Refusing to create an invalid post:\n{}", details.join("\n"));
    }

    let ext = blog
        .config
        .extensions
        .first()
        .map(|e| e.trim_start_matches('.'))
        .unwrap_or("mdx");
    let file_path = blog.content_dir.join(format!("{}.{}", slug, ext));

    if blog.loader().path_for(&slug).is_some() || file_path.exists() {
        anyhow::bail!("Post already exists: {}", slug);
    }

    fs::create_dir_all(&blog.content_dir)?;
    let content = format!("{}\n# {}\n", fm.to_yaml_block(), post.title);
    fs::write(&file_path, content)?;

    tracing::info!("Created post {} at {:?}", slug, file_path);
    Ok(file_path)
}

/// Run the new command
pub fn run(blog: &Blog, post: &NewPost) -> Result<()> {
    let path = create_post(blog, post)?;
    println!("Created: {}", path.display());
    Ok(())
}
