//! SQL for the `jobs` table. Every query except `job_owner` is owner-scoped.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPosting, JobRow, JobStatus};

/// Fields accepted when a job is created.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub company: String,
    pub position: String,
    pub listing_url: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Dashboard list filters, straight from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListQuery {
    pub query: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Maps a requested sort key onto a known column. Unknown keys sort by creation time.
pub fn sort_column(sort: Option<&str>) -> &'static str {
    match sort.map(str::trim) {
        Some("company") => "company",
        Some("position") => "position",
        Some("status") => "status",
        _ => "created_at",
    }
}

/// Only an explicit `asc` sorts ascending; newest-first otherwise.
pub fn sort_direction(order: Option<&str>) -> &'static str {
    match order.map(str::trim) {
        Some(o) if o.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    }
}

/// Escapes LIKE wildcards so a search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `None` means no status filter (`all`, blank, or absent).
pub fn status_filter(status: Option<&str>) -> Result<Option<JobStatus>, AppError> {
    match status.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(AppError::Validation),
    }
}

pub fn into_posting(row: JobRow) -> Result<JobPosting, AppError> {
    JobPosting::try_from(row).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

pub async fn insert_job(pool: &PgPool, user_id: &str, job: &NewJob) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, user_id, company, position, listing_url, location, salary, description, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&job.company)
    .bind(&job.position)
    .bind(&job.listing_url)
    .bind(&job.location)
    .bind(&job.salary)
    .bind(&job.description)
    .bind(JobStatus::Saved.as_str())
    .fetch_one(pool)
    .await
}

pub async fn list_jobs(
    pool: &PgPool,
    user_id: &str,
    search: &str,
    status: Option<JobStatus>,
    sort: &'static str,
    direction: &'static str,
) -> Result<Vec<JobRow>, sqlx::Error> {
    // Column and direction come from fixed whitelists, never from the request.
    let sql = format!(
        r#"
        SELECT * FROM jobs
        WHERE user_id = $1
          AND (company ILIKE '%' || $2 || '%' OR position ILIKE '%' || $2 || '%')
          AND ($3::text IS NULL OR status = $3)
        ORDER BY {sort} {direction}, id
        "#
    );

    sqlx::query_as::<_, JobRow>(&sql)
        .bind(user_id)
        .bind(escape_like(search))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await
}

pub async fn find_job(
    pool: &PgPool,
    job_id: Uuid,
    user_id: &str,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn job_owner(pool: &PgPool, job_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_status(
    pool: &PgPool,
    job_id: Uuid,
    user_id: &str,
    status: JobStatus,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET status = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(user_id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
}

/// Returns false when nothing owned by `user_id` matched.
pub async fn delete_job(pool: &PgPool, job_id: Uuid, user_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn status_counts(pool: &PgPool, user_id: &str) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as("SELECT status, COUNT(*) FROM jobs WHERE user_id = $1 GROUP BY status")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn daily_created_counts(
    pool: &PgPool,
    user_id: &str,
    since: DateTime<Utc>,
) -> Result<Vec<(NaiveDate, i64)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*)
        FROM jobs
        WHERE user_id = $1 AND created_at >= $2
        GROUP BY day
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await
}
