//! Settings persistence backends.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use hashbrown::HashMap;
use parking_lot::Mutex;
use serde_json::Value;

use super::SettingsError;

/// Loads and saves a settings snapshot by key.
pub trait SettingsStore: Send + Sync {
    /// Returns the snapshot saved under `key`, or `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the stored data cannot be read or parsed.
    fn load(&self, key: &str) -> Result<Option<Value>, SettingsError>;

    /// Saves `snapshot` under `key`, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the data cannot be written.
    fn save(&self, key: &str, snapshot: &Value) -> Result<(), SettingsError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// FileSettingsStore
// ─────────────────────────────────────────────────────────────────────────────

/// Stores each key as pretty-printed JSON at `{root}/{key}.json`.
///
/// Keys may contain `/` to nest files, e.g. `"ModsSettings/YourMod/YourMod"`.
/// Absolute keys and keys with `.` or `..` segments are rejected, so every
/// file stays under the root.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    root: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store rooted at `root`. Nothing is touched until a save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file `key` is stored in.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidKey`] if `key` is empty, absolute or
    /// has a `.` or `..` segment.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SettingsError> {
        let relative = Path::new(key);
        let nested = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if key.is_empty() || !nested || key.ends_with('/') {
            return Err(SettingsError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let text = match fs::read_to_string(self.path_for(key)?) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&self, key: &str, snapshot: &Value) -> Result<(), SettingsError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
        tracing::debug!(path = %path.display(), "settings written");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MemorySettingsStore
// ─────────────────────────────────────────────────────────────────────────────

/// Keeps snapshots in memory. Used by tests and hosts without a disk.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a snapshot under `key`.
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, snapshot: Value) -> Self {
        self.entries.lock().insert(key.into(), snapshot);
        self
    }

    /// Returns a copy of the snapshot under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, snapshot: &Value) -> Result<(), SettingsError> {
        self.entries.lock().insert(key.to_string(), snapshot.clone());
        Ok(())
    }
}
