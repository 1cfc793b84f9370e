//! Blocks read and search tools from touching environment files

use super::{Hook, HookEvent, Verdict};
use crate::config::HookConfig;

/// Rejects `Read` and `Grep` calls whose target contains a protected pattern
#[derive(Debug, Clone)]
pub struct EnvGuardHook {
    pattern: String,
}

impl Default for EnvGuardHook {
    fn default() -> Self {
        Self::from_config(&HookConfig::default())
    }
}

impl EnvGuardHook {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn from_config(config: &HookConfig) -> Self {
        Self::new(config.protected_pattern.clone())
    }
}

impl Hook for EnvGuardHook {
    fn name(&self) -> &str {
        "env-guard"
    }

    fn evaluate(&self, event: &HookEvent) -> Verdict {
        let target = match event.tool_name.as_deref() {
            Some("Read") => event.file_path(),
            Some("Grep") => event.search_path(),
            _ => None,
        };

        match target {
            Some(path) if !self.pattern.is_empty() && path.contains(&self.pattern) => {
                Verdict::Reject(vec![
                    format!("SECURITY: Access denied to {} file: {}", self.pattern, path),
                    "Reason: Sensitive environment files are protected".to_string(),
                ])
            }
            _ => Verdict::Allow,
        }
    }
}
