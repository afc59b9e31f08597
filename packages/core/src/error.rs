//! Errors returned by queue operations.

use thiserror::Error;

use crate::{ConsumerId, JobId, JobStatus};

/// Expected, recoverable outcomes of queue operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("job queue is empty")]
    EmptyQueue,

    #[error("no queued job is available to claim")]
    NoEligibleJob,

    #[error("job {0} not found")]
    NotFound(JobId),

    #[error("consumer {consumer} does not hold the claim on job {job_id}")]
    Unauthorized { job_id: JobId, consumer: ConsumerId },

    #[error("job {job_id} is {status}")]
    InvalidState { job_id: JobId, status: JobStatus },
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;
