use anyhow::Result;
use tracing::debug;

use crate::models::{seed_reports, Report};

use super::slot::SlotStorage;

/// Durable slot key holding the full report history
pub const REPORT_HISTORY_KEY: &str = "hc_report_history";

/// Callback invoked with the post-mutation report snapshot
pub type HistoryObserver = Box<dyn Fn(&[Report]) + Send>;

/// Owner of the persisted report history.
///
/// The collection is ordered newest-first. `append` is the only
/// mutating operation and always rewrites the whole collection; reads
/// hand out snapshots, never references into the store. When the slot
/// is absent or unreadable, `load` returns the fixed seed sequence
/// without writing it back; the first `append` persists seed plus the
/// new head. Two processes sharing the slot race as last-writer-wins.
pub struct ReportStore {
    storage: SlotStorage,
    observers: Vec<HistoryObserver>,
}

impl ReportStore {
    pub fn new(storage: SlotStorage) -> Self {
        Self {
            storage,
            observers: Vec::new(),
        }
    }

    /// Open the store over the default slot directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(SlotStorage::open_default()?))
    }

    /// Register a callback fired after every mutation with the fresh
    /// snapshot (dashboard and table refresh hang off this).
    pub fn subscribe(&mut self, observer: HistoryObserver) {
        self.observers.push(observer);
    }

    /// Read the full history, newest first. Never fails the caller:
    /// an absent or corrupt slot yields the seed sequence.
    pub fn load(&self) -> Vec<Report> {
        self.storage
            .get::<Vec<Report>>(REPORT_HISTORY_KEY)
            .unwrap_or_else(seed_reports)
    }

    /// Insert a report at the head, persist the whole collection and
    /// return the updated snapshot. Ids are not deduplicated.
    pub fn append(&self, report: Report) -> Result<Vec<Report>> {
        let mut reports = self.load();
        debug!(id = %report.id, "appending report to history");
        reports.insert(0, report);
        self.storage.set(REPORT_HISTORY_KEY, &reports)?;
        self.notify(&reports);
        Ok(reports)
    }

    /// Drop the persisted history. The next `load` returns the seed
    /// sequence again.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(REPORT_HISTORY_KEY)?;
        let reports = self.load();
        self.notify(&reports);
        Ok(())
    }

    /// Look up a report by id; duplicate ids resolve to the newest
    pub fn find(&self, id: &str) -> Option<Report> {
        self.load().into_iter().find(|r| r.id == id)
    }

    fn notify(&self, reports: &[Report]) {
        for observer in &self.observers {
            observer(reports);
        }
    }
}
