use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Durable key-value slots backed by one JSON file per key.
///
/// The client-side counterpart of the browser's per-origin local
/// storage: values are JSON-encoded, reads degrade to `None` on an
/// absent or unparseable file, and writes replace the whole value.
#[derive(Debug, Clone)]
pub struct SlotStorage {
    root: PathBuf,
}

impl SlotStorage {
    /// Open the default slot directory under the OS config dir
    pub fn open_default() -> Result<Self> {
        let root = dirs::config_dir()
            .context("Could not find config directory")?
            .join("hygienecheck");
        Ok(Self { root })
    }

    /// Open a slot directory at an explicit location (used by tests)
    pub fn open_at(root: PathBuf) -> Self {
        Self { root }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Read and decode a slot. Absence and corruption both yield `None`;
    /// corruption is logged but never surfaced to the caller.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.slot_path(key);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "unreadable slot, falling back to default");
                None
            }
        }
    }

    /// Encode and persist a slot, creating the directory as needed
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize slot '{}'", key))?;

        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create slot directory: {}", self.root.display()))?;

        let path = self.slot_path(key);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write slot file: {}", path.display()))?;

        Ok(())
    }

    /// Delete a slot; deleting a missing slot is not an error
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove slot file: {}", path.display()))?;
        }
        Ok(())
    }

    /// Whether a slot file currently exists
    pub fn contains(&self, key: &str) -> bool {
        self.slot_path(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_slot_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open_at(temp_dir.path().to_path_buf());
        assert_eq!(storage.get::<u32>("hc_threshold"), None);
        assert!(!storage.contains("hc_threshold"));
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open_at(temp_dir.path().to_path_buf());

        storage.set("hc_threshold", &85u32).unwrap();
        assert_eq!(storage.get::<u32>("hc_threshold"), Some(85));
        assert!(storage.contains("hc_threshold"));
    }

    #[test]
    fn test_corrupt_slot_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open_at(temp_dir.path().to_path_buf());

        fs::create_dir_all(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("hc_threshold.json"), "{not json").unwrap();

        assert_eq!(storage.get::<u32>("hc_threshold"), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SlotStorage::open_at(temp_dir.path().to_path_buf());

        storage.set("hc_streak", &3u32).unwrap();
        storage.remove("hc_streak").unwrap();
        assert_eq!(storage.get::<u32>("hc_streak"), None);
        // A second remove of a missing slot still succeeds
        storage.remove("hc_streak").unwrap();
    }
}
