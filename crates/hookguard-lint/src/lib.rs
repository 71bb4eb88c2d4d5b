//! Dangerous-command heuristics for hook commands.
//!
//! The heuristics flag shell commands that deserve a second look before a
//! host runs them. Matching is plain pattern detection over the raw command
//! string, not shell parsing, so results are advisory: a match is a warning
//! to surface, never a reason to reject a configuration.

mod escape;
mod heuristics;
mod library;

pub use escape::{escape_for_shell, quote_for_shell};
pub use heuristics::{Detector, Heuristic, BUILTIN_HEURISTICS};
pub use library::{CustomRule, Detection, LintError, PatternLibrary};

/// Run the built-in heuristics against `command` and return the warning
/// message of every heuristic that matched, in table order.
pub fn detect_dangerous_patterns(command: &str) -> Vec<String> {
    PatternLibrary::builtin()
        .detect(command)
        .into_iter()
        .map(|d| d.message)
        .collect()
}
