//! blogkit: content tooling for a file-based blog
//!
//! Posts live one per file in a content directory, each starting with a YAML
//! front-matter block. This crate loads and lists them, validates their
//! front-matter, and provides the editor hooks that guard post edits.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod hooks;
pub mod validate;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::PostLoader;
use validate::FrontMatterValidator;

/// A blog rooted at a base directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post files
    pub content_dir: PathBuf,
}

impl Blog {
    /// Open a blog, reading `_config.yml` from `base_dir` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::BlogConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Loader over this blog's content directory
    pub fn loader(&self) -> PostLoader {
        PostLoader::from_config(&self.base_dir, &self.config)
    }

    pub fn validator(&self) -> FrontMatterValidator {
        FrontMatterValidator::from_config(&self.config)
    }
}
