//! The mutable job record stored in the queue.

use parking_lot::Mutex;
use queue_core::{Job, JobId, JobStatus, JobType, QueueError, QueueResult};

/// A single job as held by the queue.
///
/// The status sits behind the record's own field lock. Records are shared
/// through `Arc`, so the lock is never duplicated by a copy; callers that
/// need a value take a [`Job`] snapshot instead.
#[derive(Debug)]
pub struct JobRecord {
    id: JobId,
    job_type: JobType,
    status: Mutex<JobStatus>,
}

impl JobRecord {
    /// Create a queued record.
    pub fn new(id: JobId, job_type: JobType) -> Self {
        Self {
            id,
            job_type,
            status: Mutex::new(JobStatus::Queued),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    /// Read the current status under the field lock.
    pub fn status(&self) -> JobStatus {
        *self.status.lock()
    }

    pub fn is_queued(&self) -> bool {
        self.status() == JobStatus::Queued
    }

    /// Take a consistent copy of the record.
    pub fn snapshot(&self) -> Job {
        Job::new(self.id, self.job_type).with_status(self.status())
    }

    /// Move the record from `from` to `to`.
    ///
    /// The check and the write happen under one acquisition of the field
    /// lock, so of two racing callers only one can succeed. Fails with
    /// `InvalidState` carrying the status actually observed.
    pub fn transition(&self, from: JobStatus, to: JobStatus) -> QueueResult<Job> {
        let mut status = self.status.lock();
        if *status != from || !from.can_transition_to(to) {
            return Err(QueueError::InvalidState {
                job_id: self.id,
                status: *status,
            });
        }
        *status = to;
        Ok(Job::new(self.id, self.job_type).with_status(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_queued() {
        let record = JobRecord::new(JobId(1), JobType::Normal);
        assert!(record.is_queued());
        assert_eq!(record.snapshot(), Job::new(JobId(1), JobType::Normal));
    }

    #[test]
    fn transition_checks_expected_status() {
        let record = JobRecord::new(JobId(4), JobType::TimeCritical);

        let claimed = record.transition(JobStatus::Queued, JobStatus::InProgress);
        assert_eq!(claimed.map(|job| job.status), Ok(JobStatus::InProgress));

        let again = record.transition(JobStatus::Queued, JobStatus::InProgress);
        assert_eq!(
            again,
            Err(QueueError::InvalidState {
                job_id: JobId(4),
                status: JobStatus::InProgress,
            })
        );
    }

    #[test]
    fn transition_rejects_skipping_states() {
        let record = JobRecord::new(JobId(2), JobType::Normal);
        let skipped = record.transition(JobStatus::Queued, JobStatus::Concluded);
        assert!(matches!(skipped, Err(QueueError::InvalidState { .. })));
        assert_eq!(record.status(), JobStatus::Queued);
    }
}
