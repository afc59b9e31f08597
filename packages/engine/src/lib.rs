//! Queue engine for the job queue system.
//!
//! This crate owns the in-memory job store and the claim protocol.
//!
//! # Architecture
//!
//! - `JobStore` - arrival-ordered doubly linked chain kept in an arena
//! - `JobIndex` - job id to chain node, kept in step with the store
//! - `ConsumerLedger` - job id to the consumer holding its claim
//! - `JobQueue` - composes the above behind a structural lock
//!
//! # Usage
//!
//! ```
//! use engine::JobQueue;
//! use queue_core::{ConsumerId, JobStatus, JobType};
//!
//! let queue = JobQueue::new();
//! let id = queue.enqueue(JobType::Normal);
//!
//! let worker = ConsumerId::new("worker-1");
//! let job = queue.dequeue(&worker)?;
//! assert_eq!(job.id, id);
//!
//! queue.conclude(id, &worker)?;
//! assert_eq!(queue.get_job(id)?.status, JobStatus::Concluded);
//! # Ok::<(), queue_core::QueueError>(())
//! ```

mod id_gen;
mod index;
mod ledger;
mod queue;
mod record;
mod store;

pub use id_gen::IdGenerator;
pub use index::JobIndex;
pub use ledger::ConsumerLedger;
pub use queue::JobQueue;
pub use record::JobRecord;
pub use store::{Iter, JobStore, NodeHandle};
