use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CallerId;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::models::{InterviewQuestionSet, TailoredResume};

#[derive(Debug, Deserialize)]
pub struct InterviewAnswerRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewAnswerResponse {
    pub answer: String,
}

/// POST /api/v1/jobs/:id/tailored-resume
pub async fn handle_tailored_resume(
    State(state): State<AppState>,
    caller: CallerId,
    Path(job_id): Path<Uuid>,
) -> Result<Json<TailoredResume>, AppError> {
    let resume = state
        .pipeline
        .generate_tailored_resume(&caller, job_id)
        .await?;
    Ok(Json(resume))
}

/// POST /api/v1/jobs/:id/interview-prep
pub async fn handle_interview_prep(
    State(state): State<AppState>,
    caller: CallerId,
    Path(job_id): Path<Uuid>,
) -> Result<Json<InterviewQuestionSet>, AppError> {
    let questions = state
        .pipeline
        .generate_interview_prep(&caller, job_id)
        .await?;
    Ok(Json(questions))
}

/// POST /api/v1/jobs/:id/interview-answer
pub async fn handle_interview_answer(
    State(state): State<AppState>,
    caller: CallerId,
    Path(job_id): Path<Uuid>,
    Json(req): Json<InterviewAnswerRequest>,
) -> Result<Json<InterviewAnswerResponse>, AppError> {
    let answer = state
        .pipeline
        .generate_interview_answer(&caller, job_id, &req.question)
        .await?;
    Ok(Json(InterviewAnswerResponse { answer }))
}
