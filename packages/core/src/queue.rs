//! Queue-level summary types.

use serde::{Deserialize, Serialize};

use crate::JobStatus;

/// Counts of the jobs currently held by a queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueStats {
    /// Number of live jobs, whatever their status.
    pub total: u64,
    /// Jobs waiting to be claimed.
    pub queued: u64,
    /// Jobs claimed but not yet concluded.
    pub in_progress: u64,
    /// Concluded jobs that have not been removed yet.
    pub concluded: u64,
}

impl QueueStats {
    /// Count one more job with the given status.
    pub fn record(&mut self, status: JobStatus) {
        self.total += 1;
        match status {
            JobStatus::Queued => self.queued += 1,
            JobStatus::InProgress => self.in_progress += 1,
            JobStatus::Concluded => self.concluded += 1,
        }
    }

    /// Jobs that still need work (queued + in progress).
    pub fn active(&self) -> u64 {
        self.queued + self.in_progress
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl FromIterator<JobStatus> for QueueStats {
    fn from_iter<I: IntoIterator<Item = JobStatus>>(iter: I) -> Self {
        let mut stats = QueueStats::default();
        for status in iter {
            stats.record(status);
        }
        stats
    }
}
