//! Dispatch planning
//!
//! Works out which commands a host would run for an event, without running
//! anything. Matcher-bearing events select matchers whose pattern matches
//! the tool name (unanchored regex search); direct events fire every
//! command. Matchers with a blank or invalid pattern never fire.

use hookguard_model::{EventKind, EventShape, HookCommand, HooksConfiguration};
use regex_lite::Regex;
use serde::Serialize;
use tracing::debug;

/// A command that would run for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub event: EventKind,

    /// Pattern that selected the command, for matcher-bearing events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    pub command: String,

    /// Timeout with the default applied
    pub timeout_seconds: u64,
}

impl PlannedCommand {
    fn new(event: EventKind, pattern: Option<&str>, command: &HookCommand) -> Self {
        Self {
            event,
            pattern: pattern.map(str::to_string),
            command: command.command.clone(),
            timeout_seconds: command.effective_timeout(),
        }
    }
}

/// Commands that fire for `event`, in document order.
///
/// `tool_name` is ignored for direct events. For matcher-bearing events a
/// missing tool name selects nothing.
pub fn plan_dispatch(
    config: &HooksConfiguration,
    event: EventKind,
    tool_name: Option<&str>,
) -> Vec<PlannedCommand> {
    let planned: Vec<PlannedCommand> = match event.shape() {
        EventShape::Direct(direct) => config
            .commands(direct)
            .unwrap_or_default()
            .iter()
            .map(|c| PlannedCommand::new(event, None, c))
            .collect(),
        EventShape::Matcher(matcher_event) => {
            let Some(tool) = tool_name else {
                return Vec::new();
            };
            let mut planned = Vec::new();
            for matcher in config.matchers(matcher_event).unwrap_or_default() {
                let Some(pattern) = matcher.pattern() else {
                    continue;
                };
                if pattern.trim().is_empty() || !pattern_matches(pattern, tool) {
                    continue;
                }
                planned.extend(
                    matcher
                        .hooks
                        .iter()
                        .map(|c| PlannedCommand::new(event, Some(pattern), c)),
                );
            }
            planned
        }
    };

    debug!(event = %event, tool = ?tool_name, commands = planned.len(), "planned dispatch");
    planned
}

fn pattern_matches(pattern: &str, tool: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(tool),
        Err(_) => false,
    }
}
