//! Lint configuration (.claude/hookguard.toml)
//!
//! Lets a project add its own heuristics and switch off built-in ones
//! without touching the heuristic table:
//!
//! ```toml
//! disable = ["unquoted-variable"]
//!
//! [[heuristic]]
//! id = "git-push-force"
//! pattern = "git\\s+push\\s+.*--force"
//! message = "Force push rewrites remote history"
//! ```

use hookguard_lint::{CustomRule, LintError, PatternLibrary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::store::SETTINGS_DIR;

/// File name of the lint config inside the settings directory
pub const LINT_CONFIG_FILE: &str = "hookguard.toml";

/// Error types for lint config operations
#[derive(Debug, thiserror::Error)]
pub enum LintConfigError {
    #[error("Failed to read lint config: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid heuristic: {0}")]
    Lint(#[from] LintError),

    #[error("Unknown heuristic in disable list: '{0}'")]
    UnknownHeuristic(String),
}

/// Lint configuration from `.claude/hookguard.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintConfig {
    /// Built-in heuristic ids to switch off
    #[serde(default)]
    pub disable: Vec<String>,

    /// Additional heuristics, evaluated after the built-in ones
    #[serde(default, rename = "heuristic")]
    pub heuristics: Vec<CustomRule>,
}

impl LintConfig {
    /// Default location under a project root
    pub fn default_path(project_root: &Path) -> PathBuf {
        project_root.join(SETTINGS_DIR).join(LINT_CONFIG_FILE)
    }

    /// Load and parse config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LintConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Load from `path` when it exists, otherwise the empty config
    pub fn load_optional(path: &Path) -> Result<Self, LintConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string
    pub fn from_str(s: &str) -> Result<Self, LintConfigError> {
        let config: LintConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), LintConfigError> {
        let builtin = PatternLibrary::builtin().ids();
        for id in &self.disable {
            if !builtin.contains(&id.as_str()) {
                return Err(LintConfigError::UnknownHeuristic(id.clone()));
            }
        }
        Ok(())
    }

    /// Build the pattern library this config describes
    pub fn to_library(&self) -> Result<PatternLibrary, LintConfigError> {
        let library = PatternLibrary::default()
            .without(self.disable.as_slice())
            .with_extra(self.heuristics.iter().cloned())?;
        Ok(library)
    }
}
