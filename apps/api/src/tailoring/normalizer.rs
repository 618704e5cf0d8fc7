//! Turns raw model text into one of the three record shapes.
//!
//! Beyond structural JSON parsing, the only content rule enforced is the
//! 3–5 bullet range per experience entry. Field values are otherwise trusted
//! as the model returned them.

use std::ops::RangeInclusive;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::tailoring::models::{InterviewQuestionSet, TailoredResume};
use crate::tailoring::prompts::{UseCase, INTERVIEW_QUESTION_COUNT};

pub const EXPERIENCE_BULLET_RANGE: RangeInclusive<usize> = 3..=5;

/// A validated model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Resume(TailoredResume),
    Questions(InterviewQuestionSet),
    Answer(String),
}

impl Normalized {
    pub fn into_resume(self) -> Result<TailoredResume, AppError> {
        match self {
            Normalized::Resume(resume) => Ok(resume),
            other => Err(shape_mismatch("tailored resume", &other)),
        }
    }

    pub fn into_questions(self) -> Result<InterviewQuestionSet, AppError> {
        match self {
            Normalized::Questions(questions) => Ok(questions),
            other => Err(shape_mismatch("question set", &other)),
        }
    }

    pub fn into_answer(self) -> Result<String, AppError> {
        match self {
            Normalized::Answer(answer) => Ok(answer),
            other => Err(shape_mismatch("answer", &other)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Normalized::Resume(_) => "tailored resume",
            Normalized::Questions(_) => "question set",
            Normalized::Answer(_) => "answer",
        }
    }
}

fn shape_mismatch(expected: &str, got: &Normalized) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "expected a normalized {expected}, got a {}",
        got.kind()
    ))
}

pub fn normalize(use_case: UseCase, raw: &str) -> Result<Normalized, AppError> {
    match use_case {
        UseCase::TailorResume => parse_tailored_resume(raw).map(Normalized::Resume),
        UseCase::InterviewQuestions => parse_question_set(raw).map(Normalized::Questions),
        UseCase::InterviewAnswer => parse_answer(raw).map(Normalized::Answer),
    }
}

pub fn parse_tailored_resume(raw: &str) -> Result<TailoredResume, AppError> {
    let resume: TailoredResume = parse_json(raw)?;

    for entry in &resume.experience {
        if !EXPERIENCE_BULLET_RANGE.contains(&entry.bullets.len()) {
            return Err(AppError::Normalization(format!(
                "experience entry '{}' at '{}' has {} bullets; expected {}-{}",
                entry.role,
                entry.company,
                entry.bullets.len(),
                EXPERIENCE_BULLET_RANGE.start(),
                EXPERIENCE_BULLET_RANGE.end()
            )));
        }
    }

    debug!(
        "Normalized tailored resume: {} experience, {} projects, {} skills",
        resume.experience.len(),
        resume.projects.len(),
        resume.skills.len()
    );
    Ok(resume)
}

pub fn parse_question_set(raw: &str) -> Result<InterviewQuestionSet, AppError> {
    let set: InterviewQuestionSet = parse_json(raw)?;
    if set.questions.len() != INTERVIEW_QUESTION_COUNT {
        warn!(
            "Model returned {} interview questions (asked for {})",
            set.questions.len(),
            INTERVIEW_QUESTION_COUNT
        );
    }
    Ok(set)
}

pub fn parse_answer(raw: &str) -> Result<String, AppError> {
    let answer = raw.trim();
    if answer.is_empty() {
        return Err(AppError::Normalization(
            "model returned an empty answer".to_string(),
        ));
    }
    Ok(answer.to_string())
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, AppError> {
    serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| AppError::Normalization(format!("invalid JSON from model: {e}")))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };

    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_JSON: &str = r#"{
        "fullName": "Jane Doe",
        "contactInfo": "555-0100 | jane@example.com | github.com/jane",
        "education": [{"school": "State University", "degree": "BSc Computer Science", "date": "2019"}],
        "experience": [{
            "company": "ScaleCo",
            "role": "Backend Engineer",
            "date": "2020 - Present",
            "bullets": [
                "Built Go services handling 2M requests/day",
                "Cut p99 latency by 35% with connection pooling",
                "Migrated 12 services to a shared deployment pipeline",
                "Mentored 3 junior engineers"
            ]
        }],
        "projects": [{"name": "kvlite", "description": ["Wrote an LSM key-value store in Go"]}],
        "skills": ["Go", "PostgreSQL", "Docker"]
    }"#;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_missing_closing_fence() {
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_fenced_and_bare_resume_normalize_identically() {
        let fenced = format!("```json\n{RESUME_JSON}\n```");
        let bare = parse_tailored_resume(RESUME_JSON).unwrap();
        assert_eq!(parse_tailored_resume(&fenced).unwrap(), bare);
        assert_eq!(bare.full_name, "Jane Doe");
        assert_eq!(bare.experience[0].bullets.len(), 4);
    }

    #[test]
    fn test_resume_terms_from_source_are_not_rejected() {
        let resume = parse_tailored_resume(RESUME_JSON).unwrap();
        assert!(resume.skills.contains(&"Go".to_string()));
        assert!(resume.experience[0].bullets[0].contains("Go services"));
    }

    #[test]
    fn test_invalid_json_is_normalization_error() {
        let err = parse_tailored_resume("Sure! Here is your resume: {").unwrap_err();
        assert!(matches!(err, AppError::Normalization(_)));
    }

    #[test]
    fn test_missing_required_field_is_normalization_error() {
        let missing_skills = r#"{
            "fullName": "Jane Doe",
            "contactInfo": "",
            "education": [],
            "experience": [],
            "projects": []
        }"#;
        assert!(matches!(
            parse_tailored_resume(missing_skills),
            Err(AppError::Normalization(_))
        ));
    }

    fn resume_with_bullets(bullets: &[&str]) -> String {
        let mut value: serde_json::Value = serde_json::from_str(RESUME_JSON).unwrap();
        value["experience"][0]["bullets"] = serde_json::json!(bullets);
        value.to_string()
    }

    #[test]
    fn test_too_few_bullets_is_rejected() {
        let err = parse_tailored_resume(&resume_with_bullets(&["One", "Two"])).unwrap_err();
        match err {
            AppError::Normalization(msg) => assert!(msg.contains("has 2 bullets")),
            other => panic!("expected normalization error, got {other:?}"),
        }
    }

    #[test]
    fn test_too_many_bullets_is_rejected() {
        let six = ["1", "2", "3", "4", "5", "6"];
        assert!(matches!(
            parse_tailored_resume(&resume_with_bullets(&six)),
            Err(AppError::Normalization(_))
        ));
    }

    #[test]
    fn test_bullet_range_bounds_are_accepted() {
        assert!(parse_tailored_resume(&resume_with_bullets(&["1", "2", "3"])).is_ok());
        assert!(parse_tailored_resume(&resume_with_bullets(&["1", "2", "3", "4", "5"])).is_ok());
    }

    #[test]
    fn test_question_set_parses_fenced_output() {
        let raw = r#"```json
        {"questions": [
            {"question": "How would you design a rate limiter?", "hint": "Token bucket, Redis, tradeoffs"},
            {"question": "Tell me about a production incident.", "hint": "STAR, ownership, postmortem"},
            {"question": "How do Kubernetes liveness probes differ from readiness?", "hint": "Restart vs traffic"},
            {"question": "Why Go for backend services?", "hint": "Concurrency, tooling, deploys"}
        ]}
        ```"#;
        let set = parse_question_set(raw).unwrap();
        assert_eq!(set.questions.len(), 4);
        assert_eq!(set.questions[3].hint, "Concurrency, tooling, deploys");
    }

    #[test]
    fn test_question_without_hint_is_rejected() {
        let raw = r#"{"questions": [{"question": "Why Go?"}]}"#;
        assert!(matches!(
            parse_question_set(raw),
            Err(AppError::Normalization(_))
        ));
    }

    #[test]
    fn test_answer_is_trimmed_text() {
        let answer = parse_answer("\n  At ScaleCo, our checkout API was timing out...  \n").unwrap();
        assert_eq!(answer, "At ScaleCo, our checkout API was timing out...");
    }

    #[test]
    fn test_blank_answer_is_rejected() {
        assert!(matches!(parse_answer("  \n "), Err(AppError::Normalization(_))));
    }

    #[test]
    fn test_normalize_dispatches_on_use_case() {
        let normalized = normalize(UseCase::InterviewAnswer, " ok ").unwrap();
        assert_eq!(normalized.clone().into_answer().unwrap(), "ok");
        assert!(normalized.into_resume().is_err());
    }
}
