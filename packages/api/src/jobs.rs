//! Job HTTP handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequestParts, Path, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use queue_core::{ConsumerId, Job, JobId, QueueStats};

use crate::error::ApiError;
use crate::types::{AppState, CONSUMER_HEADER, EnqueueRequest, JobIdResponse};

/// Consumer identity taken from the `X-Consumer-Id` header.
#[derive(Debug, Clone)]
pub struct Consumer(pub ConsumerId);

impl<S> FromRequestParts<S> for Consumer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(CONSUMER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Consumer(ConsumerId::new(value)))
            .ok_or_else(|| ApiError::Validation(format!("missing {CONSUMER_HEADER} header")))
    }
}

/// Enqueue a new job.
pub async fn enqueue(
    State(queue): State<AppState>,
    body: Result<Json<EnqueueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JobIdResponse>), ApiError> {
    let Json(request) = body?;
    let job_id = queue.enqueue(request.job_type);
    tracing::info!(job_id = %job_id, job_type = %request.job_type, "Enqueued job");
    Ok((StatusCode::CREATED, Json(job_id.into())))
}

/// Claim the next eligible job for the calling consumer.
pub async fn dequeue(
    State(queue): State<AppState>,
    Consumer(consumer): Consumer,
) -> Result<Json<Job>, ApiError> {
    let job = queue.dequeue(&consumer)?;
    tracing::info!(job_id = %job.id, consumer = %consumer, "Dequeued job");
    Ok(Json(job))
}

/// Report completion of a claimed job.
pub async fn conclude(
    State(queue): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
    Consumer(consumer): Consumer,
) -> Result<Json<JobIdResponse>, ApiError> {
    let Path(job_id) = path?;
    queue.conclude(job_id, &consumer)?;
    tracing::info!(job_id = %job_id, consumer = %consumer, "Concluded job");
    Ok(Json(job_id.into()))
}

/// Cancel a job by id, whatever its status.
pub async fn cancel(
    State(queue): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
) -> Result<Json<JobIdResponse>, ApiError> {
    let Path(job_id) = path?;
    queue.cancel(job_id)?;
    tracing::info!(job_id = %job_id, "Cancelled job");
    Ok(Json(job_id.into()))
}

/// Get a job by ID.
pub async fn get_job(
    State(queue): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
) -> Result<Json<Job>, ApiError> {
    let Path(job_id) = path?;
    Ok(Json(queue.get_job(job_id)?))
}

/// List all jobs in arrival order.
pub async fn list_jobs(State(queue): State<AppState>) -> Json<Vec<Job>> {
    Json(queue.get_jobs())
}

/// Evict the job at the head of the queue.
pub async fn remove_head(State(queue): State<AppState>) -> Result<Json<JobIdResponse>, ApiError> {
    let job_id = queue.remove()?;
    tracing::info!(job_id = %job_id, "Removed head job");
    Ok(Json(job_id.into()))
}

/// Counts of live jobs by status.
pub async fn stats(State(queue): State<AppState>) -> Json<QueueStats> {
    Json(queue.stats())
}
