//! Deterministic prompt templates for the three generation use cases.
//!
//! Interview prompts cut their inputs to fixed character budgets before
//! interpolation. The cut is a raw prefix, so it may land mid-sentence or
//! mid-word. The tailoring prompt carries the full résumé and description.

use serde::Serialize;

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::ResponseFormat;

/// Character budgets for the interview flows. Tailoring sends both inputs whole.
pub const QUESTIONS_JOB_CHARS: usize = 3000;
pub const ANSWER_RESUME_CHARS: usize = 3000;
pub const ANSWER_JOB_CHARS: usize = 1000;

/// Number of questions the interview-prep prompt asks for.
pub const INTERVIEW_QUESTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    TailorResume,
    InterviewQuestions,
    InterviewAnswer,
}

impl UseCase {
    pub fn response_format(&self) -> ResponseFormat {
        match self {
            UseCase::TailorResume | UseCase::InterviewQuestions => ResponseFormat::Json,
            UseCase::InterviewAnswer => ResponseFormat::Text,
        }
    }
}

/// Everything a prompt can be built from, per use case.
#[derive(Debug, Clone, Copy)]
pub enum PromptRequest<'a> {
    TailorResume {
        resume_text: &'a str,
        job_description: &'a str,
    },
    InterviewQuestions {
        job_description: &'a str,
    },
    InterviewAnswer {
        resume_text: &'a str,
        job_description: &'a str,
        question: &'a str,
    },
}

impl PromptRequest<'_> {
    pub fn use_case(&self) -> UseCase {
        match self {
            PromptRequest::TailorResume { .. } => UseCase::TailorResume,
            PromptRequest::InterviewQuestions { .. } => UseCase::InterviewQuestions,
            PromptRequest::InterviewAnswer { .. } => UseCase::InterviewAnswer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub use_case: UseCase,
    pub prompt: String,
    pub response_format: ResponseFormat,
}

pub fn build_prompt(request: PromptRequest<'_>) -> BuiltPrompt {
    let use_case = request.use_case();
    let prompt = match request {
        PromptRequest::TailorResume {
            resume_text,
            job_description,
        } => fill_template(
            TAILOR_RESUME_TEMPLATE,
            &[
                ("no_fabrication", NO_FABRICATION_INSTRUCTION),
                ("json_only", JSON_ONLY_INSTRUCTION),
                ("resume_text", resume_text),
                ("job_description", job_description),
            ],
        ),
        PromptRequest::InterviewQuestions { job_description } => {
            let count = INTERVIEW_QUESTION_COUNT.to_string();
            fill_template(
                INTERVIEW_QUESTIONS_TEMPLATE,
                &[
                    ("question_count", count.as_str()),
                    ("json_only", JSON_ONLY_INSTRUCTION),
                    (
                        "job_description",
                        truncate_chars(job_description, QUESTIONS_JOB_CHARS),
                    ),
                ],
            )
        }
        PromptRequest::InterviewAnswer {
            resume_text,
            job_description,
            question,
        } => fill_template(
            INTERVIEW_ANSWER_TEMPLATE,
            &[
                ("question", question.trim()),
                ("resume_text", truncate_chars(resume_text, ANSWER_RESUME_CHARS)),
                (
                    "job_description",
                    truncate_chars(job_description, ANSWER_JOB_CHARS),
                ),
            ],
        ),
    };

    BuiltPrompt {
        use_case,
        prompt,
        response_format: use_case.response_format(),
    }
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Replaces `{key}` placeholders in a single pass over the template.
/// Substituted values are never scanned again, and unknown braces (the JSON
/// examples) are left alone.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = values.iter().find(|(key, _)| {
            after.starts_with(key) && after[key.len()..].starts_with('}')
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

const TAILOR_RESUME_TEMPLATE: &str = r#"You are an expert Resume Architect, with the goal of creating a perfectly constructed, optimized resume for the candidate for this particular role.

GOAL: Create a DENSE, SINGLE-PAGE resume.

ADJUSTMENTS:
1. Bullet Count: Generate 3-5 bullets per role/project (aim for 4).
2. Conciseness: Bullets should be impactful but not overly wordy. Focus on the result, and use keywords from the job description.
3. No Summary: Do not include a professional summary.
4. ATS: Ensure the resume is optimized to score highly on ATS software.
5. No Lying: {no_fabrication}

STRICT CLASSIFICATION:
- Experience: Paid work and internships ONLY.
- Projects: Any non-paid work or outside projects.

CANDIDATE RESUME:
{resume_text}

TARGET JOB DESCRIPTION:
{job_description}

REQUIRED JSON STRUCTURE:
{
  "fullName": "String",
  "contactInfo": "String (Phone | Email | Link)",
  "education": [
    {
      "school": "String",
      "degree": "String",
      "date": "String"
    }
  ],
  "experience": [
    {
      "company": "String",
      "role": "String",
      "date": "String",
      "bullets": ["String", "String", "String", "String"]
    }
  ],
  "projects": [
    {
      "name": "String",
      "description": ["String", "String", "String", "String"]
    }
  ],
  "skills": ["String", "String", "String"]
}

{json_only}"#;

const INTERVIEW_QUESTIONS_TEMPLATE: &str = r#"You are an expert Hiring Manager.
Based on the following job description, generate {question_count} challenging and realistic interview questions (a mix of technical and behavioral).
For each question, provide key talking points: a concise hint on what the candidate should mention.

JOB DESCRIPTION:
{job_description}

OUTPUT JSON FORMAT:
{
  "questions": [
    {
      "question": "The interview question",
      "hint": "Bullet points or advice on how to answer"
    }
  ]
}

{json_only}"#;

const INTERVIEW_ANSWER_TEMPLATE: &str = r#"You are an expert Interview Coach.

TASK: Write a strong interview answer for the candidate based on their resume.

THE QUESTION: "{question}"

CONTEXT:
- Candidate's Resume: {resume_text}
- Job Description: {job_description}

INSTRUCTIONS:
- Use the STAR method (Situation, Task, Action, Result) but weave it into a natural response.
- Cite specific projects or experiences from the resume. Do not make things up.
- Keep it under 150 words. Conversational but professional.

OUTPUT:
Just the answer text. No "Here is the answer:" prefix."#;
