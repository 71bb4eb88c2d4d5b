//! hookguard - layered hook configuration for AI coding assistants
//!
//! Merges user, project and local hook documents with scope precedence,
//! validates the result, and flags dangerous shell commands before they
//! are saved. Execution of hooks is left to the host.

pub mod config;
pub mod id;
pub mod plan;
pub mod validate;

pub use config::{merge, EffectiveHooks, HooksStore, LintConfig, MemoryStore, SettingsStore, StoreError};
pub use id::generate_id;
pub use plan::{plan_dispatch, PlannedCommand};
pub use validate::{validate, ValidationReport, ValidationResult, Validator};

pub use hookguard_lint::{detect_dangerous_patterns, escape_for_shell, PatternLibrary};
pub use hookguard_model::{
    DirectEvent, EventKind, HookCommand, HookMatcher, HooksConfiguration, MatcherEvent, Scope,
};
