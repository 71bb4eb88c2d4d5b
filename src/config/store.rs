//! Persistence of the per-scope hooks documents
//!
//! Hooks live under the top-level `"hooks"` key of the agent settings files:
//! - user:    `~/.claude/settings.json`
//! - project: `<project>/.claude/settings.json`
//! - local:   `<project>/.claude/settings.local.json`
//!
//! Every other key in a settings file belongs to someone else and is carried
//! through a save untouched.

use hookguard_model::{HooksConfiguration, Scope};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Settings key holding the hooks document
pub const HOOKS_KEY: &str = "hooks";

/// Directory holding agent settings, relative to home or project root
pub const SETTINGS_DIR: &str = ".claude";

/// Loads and saves one hooks document per scope.
pub trait HooksStore {
    /// Load the document for `scope`. A scope with nothing stored loads as
    /// an empty configuration.
    fn load(&self, scope: Scope) -> Result<HooksConfiguration, StoreError>;

    /// Persist the document for `scope`
    fn save(&self, scope: Scope, config: &HooksConfiguration) -> Result<(), StoreError>;

    /// Where `scope` is stored, if it is backed by a file
    fn location(&self, _scope: Scope) -> Option<PathBuf> {
        None
    }
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Settings root in {} is not a JSON object", .0.display())]
    NotAnObject(PathBuf),

    #[error("Failed to serialize hooks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("JCS canonicalization error: {0}")]
    Canonicalize(String),

    #[error("No project directory configured for {0} scope")]
    NoProjectRoot(Scope),

    #[error("HOME environment variable not set")]
    NoHomeDirectory,
}

/// File-backed store over the agent settings files.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    user_settings: PathBuf,
    project_root: Option<PathBuf>,
}

impl SettingsStore {
    pub fn new(user_settings: PathBuf, project_root: Option<PathBuf>) -> Self {
        Self {
            user_settings,
            project_root,
        }
    }

    /// Store rooted at `$HOME` for the user scope
    pub fn from_env(project_root: Option<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(Self::default_user_settings()?, project_root))
    }

    /// `~/.claude/settings.json`
    pub fn default_user_settings() -> Result<PathBuf, StoreError> {
        let home = std::env::var_os("HOME").ok_or(StoreError::NoHomeDirectory)?;
        Ok(PathBuf::from(home).join(SETTINGS_DIR).join("settings.json"))
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Settings file path for a scope. Project and local scopes need a
    /// project root.
    pub fn path(&self, scope: Scope) -> Option<PathBuf> {
        match scope {
            Scope::User => Some(self.user_settings.clone()),
            Scope::Project => self
                .project_root
                .as_ref()
                .map(|root| root.join(SETTINGS_DIR).join("settings.json")),
            Scope::Local => self
                .project_root
                .as_ref()
                .map(|root| root.join(SETTINGS_DIR).join("settings.local.json")),
        }
    }

    /// Read a settings file as a JSON object. Missing files read as `None`.
    fn read_settings(path: &Path) -> Result<Option<Map<String, Value>>, StoreError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Some(Map::new()));
        }

        let value: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(StoreError::NotAnObject(path.to_path_buf())),
        }
    }

    /// Write-then-rename so readers never observe a partial file
    fn write_atomically(path: &Path, contents: &str) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = path.parent().ok_or_else(|| {
            write_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "No parent directory",
            ))
        })?;
        fs::create_dir_all(parent).map_err(write_err)?;

        let temp_path = parent.join(format!(".{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&temp_path, contents).map_err(write_err)?;
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }
        Ok(())
    }
}

impl HooksStore for SettingsStore {
    fn load(&self, scope: Scope) -> Result<HooksConfiguration, StoreError> {
        let Some(path) = self.path(scope) else {
            debug!(%scope, "no project root, scope loads empty");
            return Ok(HooksConfiguration::default());
        };

        let Some(mut settings) = Self::read_settings(&path)? else {
            debug!(%scope, path = %path.display(), "settings file absent");
            return Ok(HooksConfiguration::default());
        };

        let config = match settings.remove(HOOKS_KEY) {
            None | Some(Value::Null) => HooksConfiguration::default(),
            Some(hooks) => {
                serde_json::from_value(hooks).map_err(|source| StoreError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        };

        debug!(
            %scope,
            path = %path.display(),
            commands = config.command_count(),
            "loaded hooks"
        );
        Ok(config)
    }

    fn save(&self, scope: Scope, config: &HooksConfiguration) -> Result<(), StoreError> {
        let path = self.path(scope).ok_or(StoreError::NoProjectRoot(scope))?;

        let mut settings = Self::read_settings(&path)?.unwrap_or_default();
        if config.is_empty() {
            settings.remove(HOOKS_KEY);
        } else {
            settings.insert(HOOKS_KEY.to_string(), serde_json::to_value(config)?);
        }

        let mut json = serde_json::to_string_pretty(&Value::Object(settings))?;
        json.push('\n');
        Self::write_atomically(&path, &json)?;

        debug!(%scope, path = %path.display(), "saved hooks");
        Ok(())
    }

    fn location(&self, scope: Scope) -> Option<PathBuf> {
        self.path(scope)
    }
}

/// In-memory store for hosts that keep settings elsewhere, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<Scope, HooksConfiguration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a scope
    pub fn with(self, scope: Scope, config: HooksConfiguration) -> Self {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(scope, config);
        self
    }
}

impl HooksStore for MemoryStore {
    fn load(&self, scope: Scope) -> Result<HooksConfiguration, StoreError> {
        let documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        Ok(documents.get(&scope).cloned().unwrap_or_default())
    }

    fn save(&self, scope: Scope, config: &HooksConfiguration) -> Result<(), StoreError> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(scope, config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookguard_model::{HookCommand, HookMatcher, MatcherEvent};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(
            dir.path().join("home/.claude/settings.json"),
            Some(dir.path().join("project")),
        )
    }

    fn sample() -> HooksConfiguration {
        let mut config = HooksConfiguration::default();
        config.set_matchers(
            MatcherEvent::PreToolUse,
            Some(vec![HookMatcher::new("Bash", vec![HookCommand::new("echo pre")])]),
        );
        config
    }

    #[test]
    fn test_paths() {
        let store = SettingsStore::new(
            PathBuf::from("/home/u/.claude/settings.json"),
            Some(PathBuf::from("/work/app")),
        );
        assert_eq!(
            store.path(Scope::Project),
            Some(PathBuf::from("/work/app/.claude/settings.json"))
        );
        assert_eq!(
            store.path(Scope::Local),
            Some(PathBuf::from("/work/app/.claude/settings.local.json"))
        );
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load(Scope::User).unwrap().is_empty());
    }

    #[test]
    fn test_no_project_root() {
        let store = SettingsStore::new(PathBuf::from("/nonexistent/settings.json"), None);
        assert!(store.load(Scope::Local).unwrap().is_empty());
        assert!(matches!(
            store.save(Scope::Local, &sample()),
            Err(StoreError::NoProjectRoot(Scope::Local))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(Scope::Project, &sample()).unwrap();

        assert_eq!(store.load(Scope::Project).unwrap(), sample());
        assert!(store.load(Scope::Local).unwrap().is_empty());
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = store.path(Scope::User).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"model": "opus", "permissions": {"allow": ["Bash(ls)"]}}"#).unwrap();

        store.save(Scope::User, &sample()).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["model"], "opus");
        assert_eq!(value["permissions"]["allow"][0], "Bash(ls)");
        assert_eq!(value["hooks"]["PreToolUse"][0]["matcher"], "Bash");
    }

    #[test]
    fn test_save_empty_removes_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(Scope::User, &sample()).unwrap();

        store.save(Scope::User, &HooksConfiguration::default()).unwrap();

        let path = store.path(Scope::User).unwrap();
        let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert!(value.get("hooks").is_none());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = store.path(Scope::User).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = store.load(Scope::User).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn test_non_object_root() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = store.path(Scope::User).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(
            store.load(Scope::User),
            Err(StoreError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new().with(Scope::Local, sample());
        assert_eq!(store.load(Scope::Local).unwrap(), sample());
        assert!(store.load(Scope::User).unwrap().is_empty());

        store.save(Scope::User, &sample()).unwrap();
        assert_eq!(store.load(Scope::User).unwrap(), sample());
        assert!(store.location(Scope::User).is_none());
    }
}
