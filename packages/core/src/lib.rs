//! Core domain types for the job queue system.
//!
//! This crate contains shared types used across all packages:
//! - Job, JobType and JobStatus for work items
//! - QueueStats for queue summaries
//! - Events for lifecycle notifications
//! - QueueError for the expected failure outcomes

mod error;
mod events;
mod job;
mod queue;

pub use error::{QueueError, QueueResult};
pub use events::JobEvent;
pub use job::{ConsumerId, Job, JobId, JobStatus, JobType};
pub use queue::QueueStats;
