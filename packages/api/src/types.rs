//! HTTP request and response types.

use std::sync::Arc;

use engine::JobQueue;
use queue_core::{JobId, JobType};
use serde::{Deserialize, Serialize};

/// Shared application state.
pub type AppState = Arc<JobQueue>;

/// Header carrying the caller's consumer identity on dequeue and conclude.
pub const CONSUMER_HEADER: &str = "x-consumer-id";

/// Request type for creating a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueRequest {
    #[serde(rename = "type")]
    pub job_type: JobType,
}

/// Response carrying the id of the job an operation acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIdResponse {
    pub job_id: JobId,
}

impl From<JobId> for JobIdResponse {
    fn from(job_id: JobId) -> Self {
        Self { job_id }
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
