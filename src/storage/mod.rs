//! Durable client-side state: report history, regulator settings and
//! the training streak, all persisted through per-key JSON slots.

pub mod history;
pub mod settings;
pub mod slot;
pub mod streak;

pub use history::{ReportStore, REPORT_HISTORY_KEY};
pub use settings::SettingsStore;
pub use slot::SlotStorage;
pub use streak::StreakTracker;
