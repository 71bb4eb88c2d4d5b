//! Effective hooks with provenance
//!
//! The effective hooks snapshot captures the merged configuration plus
//! where each layer came from and a digest of the result, so a host can
//! tell whether the hooks it runs have changed since it last looked.

use chrono::{DateTime, Utc};
use hookguard_model::{HooksConfiguration, Scope};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use super::merge::merge;
use super::store::{HooksStore, StoreError};

/// Schema version for effective_hooks
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "hookguard/effective_hooks@1";

/// A contributing scope with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HooksSource {
    /// Scope of this layer
    pub scope: Scope,

    /// Backing file, if the store is file-based
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Number of commands this layer declares
    pub commands: usize,
}

/// Merged hooks with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveHooks {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When this snapshot was computed
    pub created_at: DateTime<Utc>,

    /// The merged hooks document
    pub hooks: HooksConfiguration,

    /// Contributing scopes, lowest precedence first
    pub sources: Vec<HooksSource>,

    /// SHA-256 of the canonical JSON of `hooks`
    pub digest: String,
}

impl EffectiveHooks {
    /// Load all three scopes from `store` and merge them
    pub fn load(store: &dyn HooksStore) -> Result<Self, StoreError> {
        let user = store.load(Scope::User)?;
        let project = store.load(Scope::Project)?;
        let local = store.load(Scope::Local)?;

        let sources = [(Scope::User, &user), (Scope::Project, &project), (Scope::Local, &local)]
            .into_iter()
            .map(|(scope, config)| HooksSource {
                scope,
                path: store
                    .location(scope)
                    .map(|p| p.to_string_lossy().to_string()),
                commands: config.command_count(),
            })
            .collect();

        Self::from_layers(&user, &project, &local, sources)
    }

    /// Merge already-loaded layers
    pub fn from_layers(
        user: &HooksConfiguration,
        project: &HooksConfiguration,
        local: &HooksConfiguration,
        sources: Vec<HooksSource>,
    ) -> Result<Self, StoreError> {
        let hooks = merge(user, project, local);
        let digest = Self::compute_digest(&hooks)?;

        debug!(
            events = hooks.events().len(),
            commands = hooks.command_count(),
            digest = %digest,
            "merged effective hooks"
        );

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            hooks,
            sources,
            digest,
        })
    }

    /// SHA-256 over the JCS canonical form, so key order never changes the digest
    pub fn compute_digest(hooks: &HooksConfiguration) -> Result<String, StoreError> {
        let canonical = serde_json_canonicalizer::to_vec(hooks)
            .map_err(|e| StoreError::Canonicalize(e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(hex::encode(hasher.finalize()))
    }

    /// True when `other` describes the same merged hooks
    pub fn same_hooks(&self, other: &EffectiveHooks) -> bool {
        self.digest == other.digest
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }
}
