//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Directory holding one file per post, relative to the base directory
    pub content_dir: String,
    /// Post file extensions, in lookup priority order
    pub extensions: Vec<String>,

    // Writing rules
    pub categories: Vec<String>,
    pub max_tags: usize,
    pub words_per_minute: u32,
    /// Default author for new posts
    pub author: String,
    /// Moment.js-style format used when listing posts
    pub date_format: String,

    #[serde(default)]
    pub hook: HookConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            content_dir: "content/posts".to_string(),
            extensions: vec!["mdx".to_string(), "md".to_string()],

            categories: [
                "Bedrock",
                "Infrastructure",
                "MCP",
                "CI/CD",
                "Best Practices",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_tags: 5,
            words_per_minute: 200,
            author: "Anonymous".to_string(),
            date_format: "MMMM D, YYYY".to_string(),

            hook: HookConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }
}

/// Editor hook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Path fragment a file must contain for the front-matter hook to check it
    pub watch_dir: String,
    /// Extensions the front-matter hook checks (case-insensitive)
    pub extensions: Vec<String>,
    /// Path fragment the env guard refuses to read
    pub protected_pattern: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            watch_dir: "content/posts/".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            protected_pattern: ".env".to_string(),
        }
    }
}
