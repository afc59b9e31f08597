//! Event types for job lifecycle notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ConsumerId, Job, JobId};

/// Events emitted by the job queue as jobs move through their lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JobEvent {
    /// A new job was enqueued.
    JobEnqueued { job: Job, timestamp: DateTime<Utc> },
    /// A consumer claimed a job.
    JobClaimed {
        job_id: JobId,
        consumer_id: ConsumerId,
        timestamp: DateTime<Utc>,
    },
    /// The claiming consumer concluded a job.
    JobConcluded {
        job_id: JobId,
        consumer_id: ConsumerId,
        timestamp: DateTime<Utc>,
    },
    /// A job was cancelled by id.
    JobCancelled {
        job_id: JobId,
        timestamp: DateTime<Utc>,
    },
    /// The head job was evicted.
    JobRemoved {
        job_id: JobId,
        timestamp: DateTime<Utc>,
    },
}

impl JobEvent {
    /// Get the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            JobEvent::JobEnqueued { timestamp, .. }
            | JobEvent::JobClaimed { timestamp, .. }
            | JobEvent::JobConcluded { timestamp, .. }
            | JobEvent::JobCancelled { timestamp, .. }
            | JobEvent::JobRemoved { timestamp, .. } => *timestamp,
        }
    }

    /// Get the job ID associated with this event.
    pub fn job_id(&self) -> JobId {
        match self {
            JobEvent::JobEnqueued { job, .. } => job.id,
            JobEvent::JobClaimed { job_id, .. }
            | JobEvent::JobConcluded { job_id, .. }
            | JobEvent::JobCancelled { job_id, .. }
            | JobEvent::JobRemoved { job_id, .. } => *job_id,
        }
    }

    /// Get a short description of this event for logging.
    pub fn description(&self) -> String {
        match self {
            JobEvent::JobEnqueued { job, .. } => {
                format!("Job {} enqueued as {}", job.id, job.job_type)
            }
            JobEvent::JobClaimed {
                job_id,
                consumer_id,
                ..
            } => format!("Job {} claimed by {}", job_id, consumer_id),
            JobEvent::JobConcluded {
                job_id,
                consumer_id,
                ..
            } => format!("Job {} concluded by {}", job_id, consumer_id),
            JobEvent::JobCancelled { job_id, .. } => format!("Job {} cancelled", job_id),
            JobEvent::JobRemoved { job_id, .. } => format!("Job {} removed from head", job_id),
        }
    }
}
