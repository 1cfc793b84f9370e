//! Validates post front-matter after the editor writes a post file

use std::fs;
use std::path::Path;

use super::{Hook, HookEvent, Verdict};
use crate::config::BlogConfig;
use crate::content::FrontMatter;
use crate::validate::FrontMatterValidator;

/// Rejects writes that leave a post with invalid front-matter
#[derive(Debug, Clone)]
pub struct FrontMatterHook {
    validator: FrontMatterValidator,
    watch_dir: String,
    extensions: Vec<String>,
}

impl Default for FrontMatterHook {
    fn default() -> Self {
        Self::from_config(&BlogConfig::default())
    }
}

impl FrontMatterHook {
    pub fn new(validator: FrontMatterValidator, watch_dir: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            validator,
            watch_dir: watch_dir.into(),
            extensions: extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(
            FrontMatterValidator::from_config(config),
            config.hook.watch_dir.clone(),
            config.hook.extensions.clone(),
        )
    }

    /// Whether the hook cares about `file_path` at all
    fn watches(&self, file_path: &str) -> bool {
        let normalized = file_path.replace('\\', "/");
        if !normalized.contains(&self.watch_dir) {
            return false;
        }
        Path::new(file_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Check a post file already on disk
    pub fn check_file(&self, file_path: &str) -> Verdict {
        let path = Path::new(file_path);
        if !path.exists() {
            return Verdict::Reject(vec![format!("Error: File not found at {}", file_path)]);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return Verdict::Reject(vec![format!("Error: Unable to read {}: {}", file_path, e)])
            }
        };

        let fm = match FrontMatter::parse(&content) {
            Ok((fm, _)) => fm,
            Err(e) => return Verdict::Reject(vec![format!("Frontmatter parsing error: {}", e)]),
        };

        let violations = self.validator.validate(&fm);
        if violations.is_empty() {
            return Verdict::Allow;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());

        let mut messages = vec![
            format!("Blog post frontmatter validation failed for: {}", name),
            "Validation errors found:".to_string(),
        ];
        messages.extend(violations.iter().map(ToString::to_string));
        messages.push("Please fix these errors in the frontmatter section of the blog post.".to_string());
        Verdict::Reject(messages)
    }
}

impl Hook for FrontMatterHook {
    fn name(&self) -> &str {
        "frontmatter"
    }

    fn evaluate(&self, event: &HookEvent) -> Verdict {
        match event.file_path() {
            Some(file_path) if self.watches(file_path) => self.check_file(file_path),
            _ => Verdict::Allow,
        }
    }
}
