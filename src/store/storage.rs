// Storage backend abstraction
// The store talks to persistent storage only through this trait, so the
// JSON file backend can be swapped for an in-memory one without touching
// the CRUD or validation layers.

use std::fs;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

use super::error::StoreError;
use super::todo::Snapshot;

/// Load/save interface for the snapshot document.
pub trait Storage: Send + Sync {
    /// Read the full snapshot from the backend.
    fn load(&self) -> Result<Snapshot, StoreError>;

    /// Replace the backend contents with the given snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// JSON file backend.
///
/// Each save rewrites the whole file; there is no atomicity guarantee
/// against a crash mid-write.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Snapshot, StoreError> {
        // A missing file is a fresh store, not an error
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-memory backend. Used by tests that need an isolated store with no
/// filesystem involvement.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Snapshot>,
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn load(&self) -> Result<Snapshot, StoreError> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.snapshot.lock().unwrap() = snapshot.clone();
        Ok(())
    }
}
