//! The job queue engine.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use queue_core::{
    ConsumerId, Job, JobEvent, JobId, JobStatus, JobType, QueueError, QueueResult, QueueStats,
};
use tokio::sync::broadcast;

use crate::id_gen::IdGenerator;
use crate::index::JobIndex;
use crate::ledger::ConsumerLedger;
use crate::record::JobRecord;
use crate::store::{JobStore, NodeHandle};

/// Chain and index, guarded together by the structural lock.
#[derive(Debug, Default)]
struct QueueState {
    store: JobStore,
    index: JobIndex,
}

impl QueueState {
    fn insert(&mut self, record: Arc<JobRecord>) {
        let id = record.id();
        let handle = self.store.append(record);
        self.index.put(id, handle);
    }

    fn lookup(&self, id: JobId) -> Option<&Arc<JobRecord>> {
        self.index.get(id).and_then(|handle| self.store.get(handle))
    }

    fn evict(&mut self, handle: NodeHandle) -> Option<Arc<JobRecord>> {
        let record = self.store.unlink(handle)?;
        self.index.remove(record.id());
        Some(record)
    }

    /// Pick the job the next claim should go to.
    ///
    /// First pass: the earliest queued job. If it is normal, a second pass
    /// over the nodes after it looks for a queued time-critical job, falling
    /// back to the first-pass job when there is none. Both passes end at the
    /// tail.
    fn select(&self) -> QueueResult<Arc<JobRecord>> {
        if self.store.is_empty() {
            return Err(QueueError::EmptyQueue);
        }

        let Some((handle, first)) = self.store.iter().find(|(_, record)| record.is_queued()) else {
            return Err(QueueError::NoEligibleJob);
        };
        if first.job_type().is_time_critical() {
            return Ok(Arc::clone(first));
        }

        let urgent = self
            .store
            .iter_from(self.store.next(handle))
            .find(|(_, record)| record.job_type().is_time_critical() && record.is_queued());

        Ok(Arc::clone(urgent.map_or(first, |(_, record)| record)))
    }
}

/// In-process job queue shared by producers and consumers.
///
/// All structural changes (append, unlink) and the claim scan run under a
/// single structural lock. Status changes additionally take the record's
/// field lock. Lock order is always structural, then field.
#[derive(Debug)]
pub struct JobQueue {
    ids: IdGenerator,
    state: Mutex<QueueState>,
    ledger: ConsumerLedger,
    event_tx: Option<broadcast::Sender<JobEvent>>,
}

impl JobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            ids: IdGenerator::new(),
            state: Mutex::new(QueueState::default()),
            ledger: ConsumerLedger::new(),
            event_tx: None,
        }
    }

    /// Set the event broadcaster.
    pub fn with_event_tx(mut self, tx: broadcast::Sender<JobEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Broadcast an event.
    fn broadcast(&self, event: JobEvent) {
        if let Some(ref tx) = self.event_tx {
            // No subscribers is fine.
            let _ = tx.send(event);
        }
    }

    /// Add a job at the tail and return its id.
    pub fn enqueue(&self, job_type: JobType) -> JobId {
        let id = self.ids.next();
        self.state.lock().insert(Arc::new(JobRecord::new(id, job_type)));

        tracing::debug!(job_id = %id, job_type = %job_type, "job enqueued");
        self.broadcast(JobEvent::JobEnqueued {
            job: Job::new(id, job_type),
            timestamp: Utc::now(),
        });
        id
    }

    /// Claim the next eligible job for `consumer`.
    ///
    /// A queued time-critical job wins over earlier normal jobs; otherwise
    /// the earliest queued job is claimed.
    pub fn dequeue(&self, consumer: &ConsumerId) -> QueueResult<Job> {
        let job = {
            let state = self.state.lock();
            loop {
                let record = state.select()?;
                match record.transition(JobStatus::Queued, JobStatus::InProgress) {
                    Ok(job) => {
                        self.ledger.record(job.id, consumer.clone());
                        break job;
                    }
                    // Lost the field lock race; the record is no longer queued.
                    Err(_) => continue,
                }
            }
        };

        tracing::debug!(job_id = %job.id, consumer = %consumer, "job claimed");
        self.broadcast(JobEvent::JobClaimed {
            job_id: job.id,
            consumer_id: consumer.clone(),
            timestamp: Utc::now(),
        });
        Ok(job)
    }

    /// Mark a claimed job as concluded.
    ///
    /// Only the consumer that dequeued the job may conclude it, and only
    /// once.
    pub fn conclude(&self, job_id: JobId, consumer: &ConsumerId) -> QueueResult<()> {
        let owner = self.ledger.owner(job_id).ok_or(QueueError::NotFound(job_id))?;
        if owner != *consumer {
            return Err(QueueError::Unauthorized {
                job_id,
                consumer: consumer.clone(),
            });
        }

        {
            let state = self.state.lock();
            let record = state.lookup(job_id).ok_or(QueueError::NotFound(job_id))?;
            record.transition(JobStatus::InProgress, JobStatus::Concluded)?;
        }

        tracing::debug!(job_id = %job_id, consumer = %consumer, "job concluded");
        self.broadcast(JobEvent::JobConcluded {
            job_id,
            consumer_id: consumer.clone(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Snapshot of a single job.
    pub fn get_job(&self, job_id: JobId) -> QueueResult<Job> {
        self.state
            .lock()
            .lookup(job_id)
            .map(|record| record.snapshot())
            .ok_or(QueueError::NotFound(job_id))
    }

    /// Snapshots of every live job in arrival order. Empty when the queue is.
    pub fn get_jobs(&self) -> Vec<Job> {
        self.state
            .lock()
            .store
            .iter()
            .map(|(_, record)| record.snapshot())
            .collect()
    }

    /// Evict the head job whatever its status and return its id.
    pub fn remove(&self) -> QueueResult<JobId> {
        let record = {
            let mut state = self.state.lock();
            let head = state.store.head().ok_or(QueueError::EmptyQueue)?;
            state.evict(head).ok_or(QueueError::EmptyQueue)?
        };

        let job_id = record.id();
        tracing::debug!(job_id = %job_id, status = %record.status(), "head job removed");
        self.broadcast(JobEvent::JobRemoved {
            job_id,
            timestamp: Utc::now(),
        });
        Ok(job_id)
    }

    /// Evict a job by id whatever its status.
    pub fn cancel(&self, job_id: JobId) -> QueueResult<()> {
        let record = {
            let mut state = self.state.lock();
            let handle = state.index.get(job_id).ok_or(QueueError::NotFound(job_id))?;
            state.evict(handle).ok_or(QueueError::NotFound(job_id))?
        };

        tracing::debug!(job_id = %job_id, status = %record.status(), "job cancelled");
        self.broadcast(JobEvent::JobCancelled {
            job_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Count live jobs by status.
    pub fn stats(&self) -> QueueStats {
        self.state
            .lock()
            .store
            .iter()
            .map(|(_, record)| record.status())
            .collect()
    }

    /// Number of live jobs.
    pub fn len(&self) -> usize {
        self.state.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}
