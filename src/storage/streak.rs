use anyhow::Result;
use chrono::NaiveDate;

use super::slot::SlotStorage;

pub const STREAK_KEY: &str = "hc_streak";
pub const LAST_TRAINING_KEY: &str = "hc_last_training";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Daily training-streak tracker.
///
/// A session counts at most once per calendar day; a missed day resets
/// the streak to zero on the next read.
pub struct StreakTracker {
    storage: SlotStorage,
}

impl StreakTracker {
    pub fn new(storage: SlotStorage) -> Self {
        Self { storage }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(SlotStorage::open_default()?))
    }

    /// Current streak as of `today`, applying the reset rule for gaps
    pub fn current(&self, today: NaiveDate) -> Result<u32> {
        let streak = self.storage.get::<u32>(STREAK_KEY).unwrap_or(0);
        match self.last_training() {
            Some(last) if last < today.pred_opt().unwrap_or(today) => {
                // More than a day without training breaks the streak
                self.storage.set(STREAK_KEY, &0u32)?;
                Ok(0)
            }
            _ => Ok(streak),
        }
    }

    /// Record a completed training session for `today`; returns the
    /// resulting streak. Repeat sessions on the same day are no-ops.
    pub fn record_session(&self, today: NaiveDate) -> Result<u32> {
        if self.last_training() == Some(today) {
            return self.current(today);
        }

        let streak = self.current(today)? + 1;
        self.storage.set(STREAK_KEY, &streak)?;
        self.storage
            .set(LAST_TRAINING_KEY, &today.format(DATE_FORMAT).to_string())?;
        Ok(streak)
    }

    fn last_training(&self) -> Option<NaiveDate> {
        let raw = self.storage.get::<String>(LAST_TRAINING_KEY)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok()
    }
}
