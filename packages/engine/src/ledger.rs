//! Consumer ledger: which consumer holds the claim on a job.

use dashmap::DashMap;
use queue_core::{ConsumerId, JobId};

/// Concurrent map from job id to the consumer that claimed it.
///
/// Entries are written when a job is dequeued and only read afterwards;
/// nothing removes them. Ids are never reused, so a stale entry for an
/// evicted job cannot authorize anything.
#[derive(Debug, Default)]
pub struct ConsumerLedger {
    claims: DashMap<JobId, ConsumerId>,
}

impl ConsumerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `consumer` claimed `job_id`.
    pub fn record(&self, job_id: JobId, consumer: ConsumerId) -> Option<ConsumerId> {
        self.claims.insert(job_id, consumer)
    }

    /// The consumer holding the claim on `job_id`, if it was ever claimed.
    pub fn owner(&self, job_id: JobId) -> Option<ConsumerId> {
        self.claims.get(&job_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_recorded_per_job() {
        let ledger = ConsumerLedger::new();
        assert_eq!(ledger.owner(JobId(1)), None);

        ledger.record(JobId(1), ConsumerId::new("c1"));
        ledger.record(JobId(2), ConsumerId::new("c2"));

        assert_eq!(ledger.owner(JobId(1)), Some(ConsumerId::new("c1")));
        assert_eq!(ledger.owner(JobId(2)), Some(ConsumerId::new("c2")));
        assert_eq!(ledger.len(), 2);
    }
}
