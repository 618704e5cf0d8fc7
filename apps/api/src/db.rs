use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::repository;
use crate::models::job::JobPosting;
use crate::models::preferences::UserPreferences;
use crate::profile;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Read-only store lookups the tailoring pipeline depends on.
///
/// Everything except `job_owner` is scoped to the owning user.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Owner of a job, regardless of who is asking. `None` if the job does not exist.
    async fn job_owner(&self, job_id: Uuid) -> Result<Option<String>, AppError>;

    async fn get_job(&self, job_id: Uuid, owner_id: &str) -> Result<Option<JobPosting>, AppError>;

    async fn get_preferences(&self, owner_id: &str) -> Result<Option<UserPreferences>, AppError>;
}

/// `JobStore` over the Postgres pool.
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn job_owner(&self, job_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(repository::job_owner(&self.pool, job_id).await?)
    }

    async fn get_job(&self, job_id: Uuid, owner_id: &str) -> Result<Option<JobPosting>, AppError> {
        repository::find_job(&self.pool, job_id, owner_id)
            .await?
            .map(repository::into_posting)
            .transpose()
    }

    async fn get_preferences(&self, owner_id: &str) -> Result<Option<UserPreferences>, AppError> {
        Ok(profile::repository::get_preferences(&self.pool, owner_id).await?)
    }
}
