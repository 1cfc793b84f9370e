//! Validate post files from the command line

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::FrontMatter;
use crate::validate::Violation;
use crate::Blog;

/// Result of checking one file
#[derive(Debug)]
pub enum FileReport {
    Valid,
    Invalid(Vec<Violation>),
    Unreadable(String),
}

/// Check a single file's front-matter
pub fn check_file(blog: &Blog, path: &Path) -> FileReport {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return FileReport::Unreadable(e.to_string()),
    };
    match FrontMatter::parse(&content) {
        Ok((fm, _)) => {
            let violations = blog.validator().validate(&fm);
            if violations.is_empty() {
                FileReport::Valid
            } else {
                FileReport::Invalid(violations)
            }
        }
        Err(e) => FileReport::Unreadable(e.to_string()),
    }
}

/// Validate every file, or every post in the content directory when none are given
pub fn run(blog: &Blog, files: &[PathBuf]) -> Result<()> {
    let files = if files.is_empty() {
        let loader = blog.loader();
        loader
            .list_slugs()
            .iter()
            .filter_map(|slug| loader.path_for(slug))
            .collect()
    } else {
        files.to_vec()
    };

    let mut failed = 0;
    for path in &files {
        match check_file(blog, path) {
            FileReport::Valid => println!("OK    {}", path.display()),
            FileReport::Invalid(violations) => {
                failed += 1;
                println!("FAIL  {}", path.display());
                for violation in violations {
                    println!("  {}", violation);
                }
            }
            FileReport::Unreadable(reason) => {
                failed += 1;
                println!("ERROR {}: {}", path.display(), reason);
            }
        }
    }

    tracing::info!("Validated {} file(s), {} failed", files.len(), failed);
    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed validation", failed, files.len());
    }
    Ok(())
}
