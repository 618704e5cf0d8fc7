//! One linear pass per request:
//!
//! AUTHORIZE → LOAD_CONTEXT → EXTRACT (résumé flows) → BUILD_PROMPT → GENERATE → NORMALIZE
//!
//! Any stage failure aborts the flow with that stage's error. Nothing is
//! retried, cached, or written back to the store.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::CallerId;
use crate::db::JobStore;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::job::JobPosting;
use crate::storage::DocumentFetcher;
use crate::tailoring::extractor::TextExtractor;
use crate::tailoring::models::{InterviewQuestionSet, TailoredResume};
use crate::tailoring::normalizer::{normalize, Normalized};
use crate::tailoring::prompts::{build_prompt, PromptRequest};

#[derive(Clone)]
pub struct TailoringPipeline {
    store: Arc<dyn JobStore>,
    documents: Arc<dyn DocumentFetcher>,
    extractor: Arc<dyn TextExtractor>,
    generator: Arc<dyn TextGenerator>,
}

impl TailoringPipeline {
    pub fn new(
        store: Arc<dyn JobStore>,
        documents: Arc<dyn DocumentFetcher>,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            store,
            documents,
            extractor,
            generator,
        }
    }

    /// Tailors the caller's master résumé to one of their job postings.
    pub async fn generate_tailored_resume(
        &self,
        caller: &CallerId,
        job_id: Uuid,
    ) -> Result<TailoredResume, AppError> {
        let job = self.authorize_and_load(caller, job_id).await?;
        let resume_text = self.load_resume_text(caller).await?;

        info!("Generating tailored resume for job {job_id}");
        self.run(PromptRequest::TailorResume {
            resume_text: &resume_text,
            job_description: &job.description,
        })
        .await?
        .into_resume()
    }

    /// Interview questions for a posting. Needs only the job description.
    pub async fn generate_interview_prep(
        &self,
        caller: &CallerId,
        job_id: Uuid,
    ) -> Result<InterviewQuestionSet, AppError> {
        let job = self.authorize_and_load(caller, job_id).await?;

        info!("Generating interview questions for job {job_id}");
        self.run(PromptRequest::InterviewQuestions {
            job_description: &job.description,
        })
        .await?
        .into_questions()
    }

    /// A STAR-style answer to `question`, grounded in the caller's résumé.
    pub async fn generate_interview_answer(
        &self,
        caller: &CallerId,
        job_id: Uuid,
        question: &str,
    ) -> Result<String, AppError> {
        let job = self.authorize_and_load(caller, job_id).await?;
        if question.trim().is_empty() {
            return Err(AppError::Validation("question cannot be empty".to_string()));
        }
        let resume_text = self.load_resume_text(caller).await?;

        info!("Generating interview answer for job {job_id}");
        self.run(PromptRequest::InterviewAnswer {
            resume_text: &resume_text,
            job_description: &job.description,
            question,
        })
        .await?
        .into_answer()
    }

    /// AUTHORIZE + LOAD_CONTEXT for the job.
    async fn authorize_and_load(
        &self,
        caller: &CallerId,
        job_id: Uuid,
    ) -> Result<JobPosting, AppError> {
        match self.store.job_owner(job_id).await? {
            None => return Err(AppError::NotFound("job not found".to_string())),
            Some(owner) if !caller.owns(&owner) => return Err(AppError::Unauthorized),
            Some(_) => {}
        }

        let job = self
            .store
            .get_job(job_id, caller.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound("job not found".to_string()))?;

        if job.description.is_empty() {
            return Err(AppError::NotFound("job has no description".to_string()));
        }
        Ok(job)
    }

    /// LOAD_CONTEXT + EXTRACT for the master résumé.
    async fn load_resume_text(&self, caller: &CallerId) -> Result<String, AppError> {
        let prefs = self.store.get_preferences(caller.as_str()).await?;
        if let Some(prefs) = &prefs {
            if !caller.owns(&prefs.user_id) {
                return Err(AppError::Unauthorized);
            }
        }

        let url = prefs
            .and_then(|p| p.master_resume_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::NotFound("no master resume found".to_string()))?;

        let bytes = self.documents.fetch_bytes(&url).await?;
        debug!("Fetched master resume ({} bytes)", bytes.len());

        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;
        debug!("Extracted {} characters of resume text", text.chars().count());
        Ok(text)
    }

    /// BUILD_PROMPT → GENERATE → NORMALIZE.
    async fn run(&self, request: PromptRequest<'_>) -> Result<Normalized, AppError> {
        let built = build_prompt(request);
        debug!(
            "Built {:?} prompt ({} chars)",
            built.use_case,
            built.prompt.chars().count()
        );

        let raw = self
            .generator
            .generate(&built.prompt, built.response_format)
            .await?;

        normalize(built.use_case, &raw)
    }
}
