//! The hooks document for a single scope.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::command::{HookCommand, HookMatcher};
use crate::event::{DirectEvent, EventKind, MatcherEvent};

/// Hooks registered per lifecycle event.
///
/// `None` means the event key is absent from the document. `Some(vec![])`
/// is an explicitly empty registration and survives serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HooksConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_tool_use: Option<Vec<HookMatcher>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_tool_use: Option<Vec<HookMatcher>>,

    #[serde(
        default,
        deserialize_with = "deserialize_direct",
        serialize_with = "serialize_direct",
        skip_serializing_if = "Option::is_none"
    )]
    pub notification: Option<Vec<HookCommand>>,

    #[serde(
        default,
        deserialize_with = "deserialize_direct",
        serialize_with = "serialize_direct",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop: Option<Vec<HookCommand>>,

    #[serde(
        default,
        deserialize_with = "deserialize_direct",
        serialize_with = "serialize_direct",
        skip_serializing_if = "Option::is_none"
    )]
    pub subagent_stop: Option<Vec<HookCommand>>,
}

/// Direct events accept plain commands and the settings-file group form
/// `{"hooks": [...]}`. Groups are flattened in order on read and written
/// back as a single group.
#[derive(Deserialize)]
#[serde(untagged)]
enum DirectEntry {
    Group { hooks: Vec<HookCommand> },
    Command(HookCommand),
}

fn deserialize_direct<'de, D>(deserializer: D) -> Result<Option<Vec<HookCommand>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<DirectEntry>> = Option::deserialize(deserializer)?;
    Ok(entries.map(|entries| {
        entries
            .into_iter()
            .flat_map(|entry| match entry {
                DirectEntry::Group { hooks } => hooks,
                DirectEntry::Command(command) => vec![command],
            })
            .collect()
    }))
}

#[derive(Serialize)]
struct DirectGroup<'a> {
    hooks: &'a [HookCommand],
}

fn serialize_direct<S>(commands: &Option<Vec<HookCommand>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match commands.as_deref() {
        None => serializer.serialize_none(),
        Some([]) => serializer.collect_seq(std::iter::empty::<DirectGroup<'_>>()),
        Some(hooks) => serializer.collect_seq([DirectGroup { hooks }]),
    }
}

impl HooksConfiguration {
    /// Matchers registered for a matcher-bearing event
    pub fn matchers(&self, event: MatcherEvent) -> Option<&[HookMatcher]> {
        match event {
            MatcherEvent::PreToolUse => self.pre_tool_use.as_deref(),
            MatcherEvent::PostToolUse => self.post_tool_use.as_deref(),
        }
    }

    /// Replace the matchers for a matcher-bearing event
    pub fn set_matchers(&mut self, event: MatcherEvent, matchers: Option<Vec<HookMatcher>>) {
        match event {
            MatcherEvent::PreToolUse => self.pre_tool_use = matchers,
            MatcherEvent::PostToolUse => self.post_tool_use = matchers,
        }
    }

    /// Commands registered for a direct event
    pub fn commands(&self, event: DirectEvent) -> Option<&[HookCommand]> {
        match event {
            DirectEvent::Notification => self.notification.as_deref(),
            DirectEvent::Stop => self.stop.as_deref(),
            DirectEvent::SubagentStop => self.subagent_stop.as_deref(),
        }
    }

    /// Replace the commands for a direct event
    pub fn set_commands(&mut self, event: DirectEvent, commands: Option<Vec<HookCommand>>) {
        match event {
            DirectEvent::Notification => self.notification = commands,
            DirectEvent::Stop => self.stop = commands,
            DirectEvent::SubagentStop => self.subagent_stop = commands,
        }
    }

    /// Event kinds present in this document, in document order
    pub fn events(&self) -> Vec<EventKind> {
        let mut present = Vec::new();
        for event in MatcherEvent::ALL {
            if self.matchers(event).is_some() {
                present.push(event.kind());
            }
        }
        for event in DirectEvent::ALL {
            if self.commands(event).is_some() {
                present.push(event.kind());
            }
        }
        present
    }

    /// True when no event key is present
    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }

    /// Total number of commands across all events
    pub fn command_count(&self) -> usize {
        let matcher_commands: usize = MatcherEvent::ALL
            .iter()
            .filter_map(|e| self.matchers(*e))
            .flatten()
            .map(|m| m.hooks.len())
            .sum();
        let direct_commands: usize = DirectEvent::ALL
            .iter()
            .filter_map(|e| self.commands(*e))
            .map(|c| c.len())
            .sum();
        matcher_commands + direct_commands
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
