//! Lifecycle event kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lifecycle event a hook can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PreToolUse,
    PostToolUse,
    Notification,
    Stop,
    SubagentStop,
}

/// Events whose hooks are selected by a tool-name pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherEvent {
    PreToolUse,
    PostToolUse,
}

/// Events whose hooks always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectEvent {
    Notification,
    Stop,
    SubagentStop,
}

/// The value shape of an event in a hooks document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    Matcher(MatcherEvent),
    Direct(DirectEvent),
}

impl EventKind {
    /// Every event kind in document order
    pub const ALL: [EventKind; 5] = [
        EventKind::PreToolUse,
        EventKind::PostToolUse,
        EventKind::Notification,
        EventKind::Stop,
        EventKind::SubagentStop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PreToolUse => "PreToolUse",
            EventKind::PostToolUse => "PostToolUse",
            EventKind::Notification => "Notification",
            EventKind::Stop => "Stop",
            EventKind::SubagentStop => "SubagentStop",
        }
    }

    pub fn shape(&self) -> EventShape {
        match self {
            EventKind::PreToolUse => EventShape::Matcher(MatcherEvent::PreToolUse),
            EventKind::PostToolUse => EventShape::Matcher(MatcherEvent::PostToolUse),
            EventKind::Notification => EventShape::Direct(DirectEvent::Notification),
            EventKind::Stop => EventShape::Direct(DirectEvent::Stop),
            EventKind::SubagentStop => EventShape::Direct(DirectEvent::SubagentStop),
        }
    }

    /// Whether hooks for this event carry a tool-name matcher
    pub fn is_matcher_bearing(&self) -> bool {
        matches!(self.shape(), EventShape::Matcher(_))
    }
}

impl MatcherEvent {
    pub const ALL: [MatcherEvent; 2] = [MatcherEvent::PreToolUse, MatcherEvent::PostToolUse];

    pub fn kind(self) -> EventKind {
        match self {
            MatcherEvent::PreToolUse => EventKind::PreToolUse,
            MatcherEvent::PostToolUse => EventKind::PostToolUse,
        }
    }
}

impl DirectEvent {
    pub const ALL: [DirectEvent; 3] = [
        DirectEvent::Notification,
        DirectEvent::Stop,
        DirectEvent::SubagentStop,
    ];

    pub fn kind(self) -> EventKind {
        match self {
            DirectEvent::Notification => EventKind::Notification,
            DirectEvent::Stop => EventKind::Stop,
            DirectEvent::SubagentStop => EventKind::SubagentStop,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hook event '{0}' (expected one of PreToolUse, PostToolUse, Notification, Stop, SubagentStop)")]
pub struct ParseEventKindError(pub String);

impl FromStr for EventKind {
    type Err = ParseEventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEventKindError(s.to_string()))
    }
}
