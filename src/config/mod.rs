//! Hook configuration layering
//!
//! Loads the per-scope hooks documents and merges them in precedence order:
//! 1. User settings (~/.claude/settings.json)
//! 2. Project settings (.claude/settings.json)
//! 3. Local settings (.claude/settings.local.json)

mod effective;
mod lint;
mod merge;
mod store;

pub use effective::{EffectiveHooks, HooksSource};
pub use lint::{LintConfig, LintConfigError, LINT_CONFIG_FILE};
pub use merge::{merge, merge_layers};
pub use store::{HooksStore, MemoryStore, SettingsStore, StoreError, HOOKS_KEY, SETTINGS_DIR};
