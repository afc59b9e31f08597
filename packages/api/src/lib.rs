//! HTTP API for the job queue system.
//!
//! This crate exposes the queue engine over JSON/HTTP:
//! - Job management (enqueue, dequeue, conclude, cancel, get, list, remove)
//! - Queue statistics
//! - Health check

mod error;
mod jobs;
mod types;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use jobs::Consumer;
pub use types::{AppState, CONSUMER_HEADER, EnqueueRequest, ErrorResponse, JobIdResponse};

// Re-export core types for convenience
pub use queue_core::{ConsumerId, Job, JobId, JobStatus, JobType, QueueStats};

/// Liveness probe.
async fn health() -> &'static str {
    "OK"
}

/// Create the HTTP router with all API routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(jobs::stats))
        .route("/jobs", get(jobs::list_jobs).delete(jobs::remove_head))
        .route("/jobs/enqueue", post(jobs::enqueue))
        .route("/jobs/dequeue", get(jobs::dequeue))
        .route("/jobs/{job_id}", get(jobs::get_job))
        .route("/jobs/{job_id}/conclude", post(jobs::conclude))
        .route("/jobs/{job_id}/cancel", post(jobs::cancel))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
