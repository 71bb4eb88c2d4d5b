//! Hook configuration document types.
//!
//! A hooks document maps lifecycle events to the shell commands a host runs
//! when the event fires. Two event shapes exist: matcher-bearing events pair a
//! tool-name pattern with its commands, direct events list commands only.
//! The JSON layout matches the `"hooks"` object of an agent settings file.

mod command;
mod config;
mod event;
mod scope;

pub use command::{HookCommand, HookMatcher, HookType, DEFAULT_TIMEOUT_SECONDS};
pub use config::HooksConfiguration;
pub use event::{DirectEvent, EventKind, EventShape, MatcherEvent, ParseEventKindError};
pub use scope::{ParseScopeError, Scope};
