//! Durable local state for FocusFlow.
//!
//! One TOML file under `~/.config/focusflow/` plays the role the browser's
//! localStorage plays for the web client: it holds the session token, the
//! accessibility snapshot, and the server URL. Reads degrade to defaults
//! when the file is missing or unreadable; every write rewrites the whole
//! file.

use std::path::PathBuf;

use focusflow_core::{AccessibilitySettings, SnapshotStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STATE_FILE: &str = "focusflow.toml";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine home directory")]
    NoHome,
    #[error("serialize state: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ── Stored shape ────────────────────────────────────────────────────────

/// Everything FocusFlow keeps on disk between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredState {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub accessibility: AccessibilitySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub token: Option<String>,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

// ── Store handle ────────────────────────────────────────────────────────

/// Handle on the directory holding the state file.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// The default location, `~/.config/focusflow`.
    pub fn open() -> Result<Self, StoreError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| StoreError::NoHome)?;
        Ok(Self::at(PathBuf::from(home).join(".config").join("focusflow")))
    }

    /// Store rooted at an explicit directory (tests, portable installs).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    /// Load the stored state; a missing or corrupt file yields defaults.
    pub fn load(&self) -> StoredState {
        std::fs::read_to_string(self.path())
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, state: &StoredState) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let content = toml::to_string_pretty(state)?;
        std::fs::write(self.path(), content)?;
        Ok(())
    }

    pub fn save_token(&self, token: &str) -> Result<(), StoreError> {
        let mut state = self.load();
        state.auth.token = Some(token.to_string());
        self.save(&state)
    }

    /// Logout side-effect contract: the token goes away, preferences stay.
    pub fn clear_token(&self) -> Result<(), StoreError> {
        let mut state = self.load();
        state.auth.token = None;
        self.save(&state)
    }
}

impl SnapshotStore for LocalStore {
    type Error = StoreError;

    fn persist_accessibility(
        &mut self,
        settings: &AccessibilitySettings,
    ) -> Result<(), Self::Error> {
        let mut state = self.load();
        state.accessibility = *settings;
        self.save(&state)
    }
}
