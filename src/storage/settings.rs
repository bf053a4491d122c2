use anyhow::Result;

use crate::models::{RegulatorSettings, ValidationError};

use super::slot::SlotStorage;

pub const THRESHOLD_KEY: &str = "hc_threshold";
pub const STRICT_MASKS_KEY: &str = "hc_masks";
pub const EMAIL_ALERTS_KEY: &str = "hc_emails";

/// Persistence for the regulator policy settings.
///
/// Each field lives in its own durable key so a single corrupt value
/// only loses that value, matching the source key layout.
pub struct SettingsStore {
    storage: SlotStorage,
}

impl SettingsStore {
    pub fn new(storage: SlotStorage) -> Self {
        Self { storage }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(SlotStorage::open_default()?))
    }

    /// Current settings; any absent or unreadable key degrades to its default
    pub fn load(&self) -> RegulatorSettings {
        let defaults = RegulatorSettings::default();
        RegulatorSettings {
            threshold: self
                .storage
                .get::<u8>(THRESHOLD_KEY)
                .filter(|t| *t <= 100)
                .unwrap_or(defaults.threshold),
            strict_masks: self
                .storage
                .get::<bool>(STRICT_MASKS_KEY)
                .unwrap_or(defaults.strict_masks),
            email_alerts: self
                .storage
                .get::<bool>(EMAIL_ALERTS_KEY)
                .unwrap_or(defaults.email_alerts),
        }
    }

    pub fn set_threshold(&self, threshold: u8) -> Result<()> {
        if threshold > 100 {
            return Err(ValidationError::OutOfRange {
                field: "threshold".to_string(),
                reason: format!("{} is not within 0-100", threshold),
            }
            .into());
        }
        self.storage.set(THRESHOLD_KEY, &threshold)
    }

    pub fn set_strict_masks(&self, enabled: bool) -> Result<()> {
        self.storage.set(STRICT_MASKS_KEY, &enabled)
    }

    pub fn set_email_alerts(&self, enabled: bool) -> Result<()> {
        self.storage.set(EMAIL_ALERTS_KEY, &enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(SlotStorage::open_at(dir.path().to_path_buf()))
    }

    #[test]
    fn test_defaults_when_unset() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let settings = store.load();
        assert_eq!(settings.threshold, 80);
        assert!(settings.strict_masks);
        assert!(settings.email_alerts);
    }

    #[test]
    fn test_saved_values_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set_threshold(85).unwrap();
        store.set_strict_masks(false).unwrap();

        let settings = store.load();
        assert_eq!(settings.threshold, 85);
        assert!(!settings.strict_masks);
        assert!(settings.email_alerts);
    }

    #[test]
    fn test_threshold_must_be_a_percentage() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        assert!(store.set_threshold(101).is_err());
        assert!(store.set_threshold(100).is_ok());
    }

    #[test]
    fn test_corrupt_key_degrades_to_default() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("hc_threshold.json"), "\"eighty\"").unwrap();

        let store = store_in(&temp_dir);
        assert_eq!(store.load().threshold, 80);
    }
}
