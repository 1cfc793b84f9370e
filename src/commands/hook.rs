//! Process wrapper for editor hooks
//!
//! Reads the whole JSON payload from stdin, evaluates the hook, writes any
//! messages to stderr and turns the verdict into an exit status.

use std::io::{Read, Write};

use crate::hooks::{run_hook, Hook, Verdict};

/// Evaluate `hook` against a payload read from `input`, reporting to `errors`.
/// Returns the exit code.
pub fn execute<R: Read, W: Write>(hook: &dyn Hook, mut input: R, mut errors: W) -> i32 {
    let mut payload = String::new();
    let verdict = match input.read_to_string(&mut payload) {
        Ok(_) => run_hook(hook, &payload),
        Err(e) => Verdict::Error(format!("failed to read stdin: {}", e)),
    };

    for message in verdict.messages() {
        // Nothing useful can be done if stderr itself is gone
        let _ = writeln!(errors, "{}", message);
    }
    verdict.exit_code()
}

/// Run `hook` as the current process and exit with its verdict
pub fn run(hook: &dyn Hook) -> ! {
    let code = execute(hook, std::io::stdin().lock(), std::io::stderr().lock());
    std::process::exit(code)
}
