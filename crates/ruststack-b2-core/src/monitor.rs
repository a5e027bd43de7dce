//! In-flight large upload tracking.
//!
//! [`TransferMonitor`] is a process-local table of large files that have been
//! started but not yet finished, with per-part progress reported by whatever
//! moves the bytes. It is informational only: the backends remain the source
//! of truth for which parts exist.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use serde::Serialize;

/// Progress of one large file, keyed by part number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterStatus {
    /// Name of the file being written.
    pub file_name: String,
    /// Completion ratio in `[0, 1]` per part number.
    pub parts: BTreeMap<u32, f64>,
}

/// Snapshot of every tracked upload, keyed by file id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    /// Tracked uploads.
    pub writers: BTreeMap<String, WriterStatus>,
}

/// Locked table of in-flight large uploads.
#[derive(Debug, Default)]
pub struct TransferMonitor {
    writers: Mutex<HashMap<String, WriterStatus>>,
}

impl TransferMonitor {
    /// Create an empty monitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `file_id`. Re-adding a tracked file resets its progress.
    pub fn add_writer(&self, file_id: &str, file_name: &str) {
        self.writers.lock().insert(
            file_id.to_owned(),
            WriterStatus {
                file_name: file_name.to_owned(),
                parts: BTreeMap::new(),
            },
        );
    }

    /// Stop tracking `file_id`. Returns whether it was tracked.
    pub fn remove_writer(&self, file_id: &str) -> bool {
        self.writers.lock().remove(file_id).is_some()
    }

    /// Record progress for one part, clamping `ratio` to `[0, 1]`.
    ///
    /// Returns `false` if `file_id` is not tracked.
    pub fn report_progress(&self, file_id: &str, part_number: u32, ratio: f64) -> bool {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        match self.writers.lock().get_mut(file_id) {
            Some(status) => {
                status.parts.insert(part_number, ratio);
                true
            }
            None => false,
        }
    }

    /// Whether `file_id` is tracked.
    #[must_use]
    pub fn is_tracked(&self, file_id: &str) -> bool {
        self.writers.lock().contains_key(file_id)
    }

    /// Snapshot of all tracked uploads.
    #[must_use]
    pub fn status(&self) -> StatusInfo {
        let writers = self.writers.lock();
        StatusInfo {
            writers: writers
                .iter()
                .map(|(id, status)| (id.clone(), status.clone()))
                .collect(),
        }
    }
}
