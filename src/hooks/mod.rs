//! Editor hooks
//!
//! An editor runs a hook as a one-shot process around each tool call, feeding
//! it a JSON description of the call on stdin. Hooks here are pure: they turn
//! a [`HookEvent`] into a [`Verdict`], and only the process wrapper in
//! `commands::hook` maps that verdict onto stderr and an exit status.

mod env_guard;
mod frontmatter;

pub use env_guard::EnvGuardHook;
pub use frontmatter::FrontMatterHook;

use serde::Deserialize;

/// A tool call as described by the editor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
}

/// The arguments of the tool call that matter to hooks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
    /// Search root for Grep-like tools
    #[serde(default)]
    pub path: Option<String>,
}

impl HookEvent {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.as_ref()?.file_path.as_deref()
    }

    pub fn search_path(&self) -> Option<&str> {
        self.tool_input.as_ref()?.path.as_deref()
    }
}

/// Outcome of a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// Block the tool call; the messages explain why
    Reject(Vec<String>),
    /// The hook itself failed
    Error(String),
}

impl Verdict {
    pub const ALLOW_CODE: i32 = 0;
    pub const ERROR_CODE: i32 = 1;
    pub const REJECT_CODE: i32 = 2;

    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Allow => Self::ALLOW_CODE,
            Verdict::Reject(_) => Self::REJECT_CODE,
            Verdict::Error(_) => Self::ERROR_CODE,
        }
    }

    /// Lines to write to stderr
    pub fn messages(&self) -> Vec<String> {
        match self {
            Verdict::Allow => Vec::new(),
            Verdict::Reject(messages) => messages.clone(),
            Verdict::Error(message) => vec![format!("Hook error: {}", message)],
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// A check run around editor tool calls
pub trait Hook {
    fn name(&self) -> &str;

    fn evaluate(&self, event: &HookEvent) -> Verdict;
}

/// Decode a raw JSON payload and evaluate it
pub fn run_hook(hook: &dyn Hook, input: &str) -> Verdict {
    match HookEvent::from_json(input) {
        Ok(event) => {
            let verdict = hook.evaluate(&event);
            tracing::debug!(
                "Hook {} on {:?}: exit {}",
                hook.name(),
                event.tool_name,
                verdict.exit_code()
            );
            verdict
        }
        Err(e) => Verdict::Error(format!("invalid hook payload: {}", e)),
    }
}
