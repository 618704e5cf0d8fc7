//! Axum route handlers for the job tracker.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::CallerId;
use crate::errors::AppError;
use crate::jobs::repository::{self, into_posting, JobListQuery, NewJob};
use crate::jobs::stats::{compute_stats, window_start, PipelineStats};
use crate::models::job::{JobPosting, JobStatus};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub count: usize,
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: JobStatus,
}

/// Trims every field; blank optionals become `None`.
fn clean_new_job(job: NewJob) -> Result<NewJob, AppError> {
    fn optional(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    let company = job.company.trim().to_string();
    let position = job.position.trim().to_string();
    if company.is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }
    if position.is_empty() {
        return Err(AppError::Validation("position cannot be empty".to_string()));
    }

    Ok(NewJob {
        company,
        position,
        listing_url: optional(job.listing_url),
        location: optional(job.location),
        salary: optional(job.salary),
        description: job.description.trim().to_string(),
    })
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    caller: CallerId,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    let job = clean_new_job(request)?;
    let row = repository::insert_job(&state.db, caller.as_str(), &job).await?;
    info!("Created job {} for user {}", row.id, caller.as_str());
    Ok((StatusCode::CREATED, Json(into_posting(row)?)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    caller: CallerId,
    Query(params): Query<JobListQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let status = repository::status_filter(params.status.as_deref())?;
    let search = params.query.as_deref().unwrap_or("").trim();

    let rows = repository::list_jobs(
        &state.db,
        caller.as_str(),
        search,
        status,
        repository::sort_column(params.sort.as_deref()),
        repository::sort_direction(params.order.as_deref()),
    )
    .await?;

    let jobs = rows
        .into_iter()
        .map(into_posting)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(JobListResponse {
        count: jobs.len(),
        jobs,
    }))
}

/// GET /api/v1/jobs/stats
pub async fn handle_job_stats(
    State(state): State<AppState>,
    caller: CallerId,
) -> Result<Json<PipelineStats>, AppError> {
    let today = Utc::now().date_naive();
    let since = window_start(today)
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);

    let status_counts = repository::status_counts(&state.db, caller.as_str()).await?;
    let daily_counts = repository::daily_created_counts(&state.db, caller.as_str(), since).await?;

    Ok(Json(compute_stats(&status_counts, &daily_counts, today)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    caller: CallerId,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobPosting>, AppError> {
    let row = repository::find_job(&state.db, job_id, caller.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(into_posting(row)?))
}

/// PATCH /api/v1/jobs/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    caller: CallerId,
    Path(job_id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<JobPosting>, AppError> {
    let row = repository::update_status(&state.db, job_id, caller.as_str(), update.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    info!("Job {job_id} moved to {}", update.status);
    Ok(Json(into_posting(row)?))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    caller: CallerId,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !repository::delete_job(&state.db, job_id, caller.as_str()).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("Deleted job {job_id} for user {}", caller.as_str());
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job(company: &str, position: &str) -> NewJob {
        NewJob {
            company: company.to_string(),
            position: position.to_string(),
            listing_url: Some("  ".to_string()),
            location: Some(" Remote ".to_string()),
            salary: None,
            description: "  Senior backend role, Go, Kubernetes \n".to_string(),
        }
    }

    #[test]
    fn test_clean_new_job_trims_and_drops_blank_optionals() {
        let job = clean_new_job(new_job(" ScaleCo ", "Backend Engineer")).unwrap();
        assert_eq!(job.company, "ScaleCo");
        assert_eq!(job.listing_url, None);
        assert_eq!(job.location.as_deref(), Some("Remote"));
        assert_eq!(job.description, "Senior backend role, Go, Kubernetes");
    }

    #[test]
    fn test_clean_new_job_requires_company_and_position() {
        assert!(matches!(
            clean_new_job(new_job("  ", "Backend Engineer")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            clean_new_job(new_job("ScaleCo", "")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_status_update_rejects_unknown_status() {
        let result: Result<StatusUpdate, _> =
            serde_json::from_value(serde_json::json!({"status": "GHOSTED"}));
        assert!(result.is_err());
        let ok: StatusUpdate = serde_json::from_value(serde_json::json!({"status": "OFFER"})).unwrap();
        assert_eq!(ok.status, JobStatus::Offer);
    }
}
