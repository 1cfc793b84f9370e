//! List blog content

use anyhow::Result;
use std::fmt::Write;

use crate::content::{reading_time, Post};
use crate::helpers::{format_date, format_reading_time};
use crate::Blog;

/// Filters applied to a post listing
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// List blog content by type
pub fn run(blog: &Blog, content_type: &str, filter: &ListFilter) -> Result<()> {
    print!("{}", render(blog, content_type, filter)?);
    Ok(())
}

/// Render a listing as text
pub fn render(blog: &Blog, content_type: &str, filter: &ListFilter) -> Result<String> {
    let loader = blog.loader();
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let posts: Vec<Post> = loader
                .all_published()
                .into_iter()
                .filter(|p| filter.category.as_deref().map_or(true, |c| p.in_category(c)))
                .filter(|p| filter.tag.as_deref().map_or(true, |t| p.has_tag(t)))
                .collect();
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                writeln!(
                    out,
                    "  {} - {} [{}] ({}, {})",
                    format_date(&post.date, &blog.config.date_format),
                    post.title,
                    post.slug,
                    post.category,
                    format_reading_time(reading_time::estimate_with(
                        &post.content,
                        blog.config.words_per_minute
                    ))
                )?;
            }
        }
        "tag" | "tags" => {
            let tags = loader.tag_counts();
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        "category" | "categories" => {
            let categories = loader.category_counts();
            writeln!(out, "Categories ({}):", categories.len())?;
            for (category, count) in categories {
                writeln!(out, "  {} ({})", category, count)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(out)
}
