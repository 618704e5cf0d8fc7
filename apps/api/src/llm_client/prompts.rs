// Shared prompt fragments.
// Each feature that calls the model keeps its own prompts.rs alongside it;
// this file only holds wording used by more than one of them.

/// Appended to prompts whose answer must be a bare JSON document.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Keeps the model to what the candidate's own résumé supports.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Do not create skills, roles, employers, or projects for the candidate. \
    Only use material that appears in the candidate's resume.";
