//! Hook command and matcher value types.

use serde::{Deserialize, Serialize};

/// Timeout applied when a command does not declare one.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Handler type tag. Only shell commands exist today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookType {
    #[default]
    Command,
}

/// A single shell invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookCommand {
    /// Handler type (always `"command"`)
    #[serde(rename = "type", default)]
    pub kind: HookType,

    /// Literal shell command line. Absent deserializes as empty so the
    /// validator can report it instead of the parser rejecting the document.
    #[serde(default)]
    pub command: String,

    /// Timeout in seconds
    #[serde(
        default,
        alias = "timeoutSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<u64>,
}

impl HookCommand {
    /// Create a command with the default timeout
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            kind: HookType::Command,
            command: command.into(),
            timeout: None,
        }
    }

    /// Set an explicit timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Timeout the host should apply. Zero is treated as unset.
    pub fn effective_timeout(&self) -> u64 {
        self.timeout
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

/// A tool-name pattern and the commands that run when it matches.
///
/// The literal pattern string is the matcher's identity when layers are
/// merged: `Bash` and `^Bash$` are different slots even though they select
/// the same tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMatcher {
    /// Regular expression tested against the tool name
    #[serde(default, alias = "pattern", skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,

    /// Commands run in order when the pattern matches
    #[serde(default)]
    pub hooks: Vec<HookCommand>,
}

impl HookMatcher {
    /// Create a matcher for `pattern` with the given commands
    pub fn new(pattern: impl Into<String>, hooks: Vec<HookCommand>) -> Self {
        Self {
            matcher: Some(pattern.into()),
            hooks,
        }
    }

    /// The pattern string, if any
    pub fn pattern(&self) -> Option<&str> {
        self.matcher.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_timeout_default() {
        let cmd = HookCommand::new("echo hi");
        assert_eq!(cmd.effective_timeout(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(cmd.with_timeout(5).effective_timeout(), 5);
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let cmd = HookCommand::new("echo hi").with_timeout(0);
        assert_eq!(cmd.effective_timeout(), 60);
    }

    #[test]
    fn test_command_deserialization() {
        let cmd: HookCommand =
            serde_json::from_str(r#"{"type":"command","command":"ls","timeout":10}"#).unwrap();
        assert_eq!(cmd.command, "ls");
        assert_eq!(cmd.timeout, Some(10));
    }

    #[test]
    fn test_timeout_seconds_alias() {
        let cmd: HookCommand =
            serde_json::from_str(r#"{"command":"ls","timeoutSeconds":3}"#).unwrap();
        assert_eq!(cmd.timeout, Some(3));
        assert_eq!(cmd.kind, HookType::Command);
    }

    #[test]
    fn test_missing_command_is_empty() {
        let cmd: HookCommand = serde_json::from_str(r#"{"type":"command"}"#).unwrap();
        assert!(cmd.command.is_empty());
    }

    #[test]
    fn test_matcher_serialization() {
        let matcher = HookMatcher::new("Bash", vec![HookCommand::new("echo start")]);
        let json = serde_json::to_string(&matcher).unwrap();
        assert!(json.contains("\"matcher\":\"Bash\""));
        assert!(json.contains("\"type\":\"command\""));
        assert!(!json.contains("timeout"));
    }

    #[test]
    fn test_matcher_pattern_alias() {
        let matcher: HookMatcher =
            serde_json::from_str(r#"{"pattern":"Edit|Write","hooks":[]}"#).unwrap();
        assert_eq!(matcher.pattern(), Some("Edit|Write"));
    }
}
