//! Show a single post

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::content::reading_time;
use crate::helpers::{format_reading_time, full_date};
use crate::Blog;

/// Print a post's metadata, as text or JSON
pub fn run(blog: &Blog, slug: &str, json: bool) -> Result<()> {
    print!("{}", render(blog, slug, json)?);
    Ok(())
}

pub fn render(blog: &Blog, slug: &str, json: bool) -> Result<String> {
    let post = blog
        .loader()
        .try_load(slug)
        .with_context(|| format!("Cannot show post {}", slug))?;
    let minutes = reading_time::estimate_with(&post.content, blog.config.words_per_minute);

    if json {
        let mut value = serde_json::to_value(&post)?;
        value["reading_time"] = serde_json::Value::from(minutes);
        return Ok(format!("{}\n", serde_json::to_string_pretty(&value)?));
    }

    let mut out = String::new();
    writeln!(out, "{}", post.title)?;
    if !post.published {
        writeln!(out, "  (draft)")?;
    }
    writeln!(out, "  Date:     {}", full_date(&post.date))?;
    writeln!(out, "  Author:   {}", post.author)?;
    writeln!(out, "  Category: {}", post.category)?;
    writeln!(out, "  Tags:     {}", post.tags.join(", "))?;
    writeln!(out, "  Reading:  {}", format_reading_time(minutes))?;
    if !post.excerpt.is_empty() {
        writeln!(out, "\n  {}", post.excerpt)?;
    }
    Ok(out)
}
