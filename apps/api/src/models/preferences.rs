use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row per user. The master résumé pointer is overwritten on re-upload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserPreferences {
    pub user_id: String,
    pub master_resume_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}
