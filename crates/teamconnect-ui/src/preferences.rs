//! Persistent key/value preferences.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use teamconnect_core::error::{AppError, ErrorKind};
use teamconnect_core::result::AppResult;

/// String key/value store that survives restarts.
pub trait PreferenceStore: Send {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// In-memory store, used by tests and when no file is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk.
///
/// Every `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonPreferenceStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Corrupt preference file '{}': {e}", path.display()),
                    e,
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read preference file '{}': {e}", path.display()),
                    e,
                ));
            }
        };
        tracing::debug!("Loaded {} preferences from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("Failed to create '{}': {e}", parent.display()))
            })?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text).map_err(|e| {
            AppError::storage(format!(
                "Failed to write preference file '{}': {e}",
                self.path.display()
            ))
        })
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}
