//! Axum route handlers for the user profile and master résumé upload.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::auth::CallerId;
use crate::errors::AppError;
use crate::profile::repository;
use crate::state::AppState;

const RESUME_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub master_resume_url: Option<String>,
}

/// True when the upload declares itself a PDF or starts with the PDF magic bytes.
pub fn looks_like_pdf(content_type: Option<&str>, bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF") || content_type == Some("application/pdf")
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    caller: CallerId,
) -> Result<Json<ProfileResponse>, AppError> {
    let prefs = repository::get_preferences(&state.db, caller.as_str()).await?;
    Ok(Json(ProfileResponse {
        user_id: caller.as_str().to_string(),
        master_resume_url: prefs.and_then(|p| p.master_resume_url),
    }))
}

/// POST /api/v1/profile/resume
///
/// Multipart upload, field `file`. Replaces the caller's master résumé.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    caller: CallerId,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut upload: Option<(Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((content_type, bytes));
        break;
    }

    let (content_type, bytes) = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{RESUME_FIELD}' field")))?;

    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if !looks_like_pdf(content_type.as_deref(), &bytes) {
        return Err(AppError::Validation("Master resume must be a PDF".to_string()));
    }

    let size = bytes.len();
    let url = state
        .resumes
        .upload_master_resume(caller.as_str(), bytes)
        .await?;
    let prefs = repository::set_master_resume(&state.db, caller.as_str(), &url).await?;
    info!("Master resume updated for user {} ({size} bytes)", caller.as_str());

    Ok(Json(ProfileResponse {
        user_id: prefs.user_id,
        master_resume_url: prefs.master_resume_url,
    }))
}
