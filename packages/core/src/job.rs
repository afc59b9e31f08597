//! Job domain types for work items in the queue.

use serde::{Deserialize, Serialize};

/// Unique identifier for a job.
///
/// Ids are positive and handed out in increasing order, so a larger id
/// always means a later enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    /// Get the raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for JobId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the worker that claimed a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsumerId(String);

impl ConsumerId {
    /// Create a consumer id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConsumerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ConsumerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Class of a job. Time-critical jobs are claimed ahead of normal ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    TimeCritical,
    #[default]
    Normal,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::TimeCritical => "TIME_CRITICAL",
            JobType::Normal => "NORMAL",
        }
    }

    pub fn is_time_critical(&self) -> bool {
        matches!(self, JobType::TimeCritical)
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current status of a job in its lifecycle.
///
/// Transitions only move forward: `Queued -> InProgress -> Concluded`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Job is waiting to be claimed.
    #[default]
    Queued,
    /// Job has been claimed by a consumer.
    InProgress,
    /// The claiming consumer reported completion.
    Concluded,
}

impl JobStatus {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Concluded)
    }

    /// Check whether `next` is the one legal successor of this status.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Queued, JobStatus::InProgress) | (JobStatus::InProgress, JobStatus::Concluded)
        )
    }

    /// Get a simple status string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Concluded => "CONCLUDED",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-in-time copy of a job, as handed out to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier for this job.
    pub id: JobId,
    /// Job class used for claim ordering.
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// Status at the moment the snapshot was taken.
    pub status: JobStatus,
}

impl Job {
    /// Create a freshly queued job.
    pub fn new(id: JobId, job_type: JobType) -> Self {
        Self {
            id,
            job_type,
            status: JobStatus::Queued,
        }
    }

    /// Set the status for this snapshot.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::disallowed_methods)]

    use super::*;

    #[test]
    fn job_serializes_to_wire_shape() {
        let job = Job::new(JobId(7), JobType::TimeCritical).with_status(JobStatus::InProgress);
        let value = serde_json::to_value(job).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "type": "TIME_CRITICAL", "status": "IN_PROGRESS"})
        );
    }

    #[test]
    fn job_type_parses_from_wire_names() {
        let normal: JobType = serde_json::from_str("\"NORMAL\"").unwrap();
        assert_eq!(normal, JobType::Normal);
        assert!(serde_json::from_str::<JobType>("\"URGENT\"").is_err());
    }

    #[test]
    fn status_only_moves_forward() {
        assert!(JobStatus::Queued.can_transition_to(JobStatus::InProgress));
        assert!(JobStatus::InProgress.can_transition_to(JobStatus::Concluded));
        assert!(!JobStatus::Queued.can_transition_to(JobStatus::Concluded));
        assert!(!JobStatus::Concluded.can_transition_to(JobStatus::InProgress));
        assert!(!JobStatus::InProgress.can_transition_to(JobStatus::Queued));
        assert!(JobStatus::Concluded.is_terminal());
    }
}
