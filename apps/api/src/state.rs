use sqlx::PgPool;

use crate::storage::ResumeStorage;
use crate::tailoring::pipeline::TailoringPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Master résumé uploads.
    pub resumes: ResumeStorage,
    pub pipeline: TailoringPipeline,
}
