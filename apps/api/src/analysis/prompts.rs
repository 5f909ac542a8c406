// Analysis prompt templates.
// All prompts for the analysis module are defined here.

use serde::{Deserialize, Serialize};

/// Resume text sent with the pitch prompt is cut to this many characters.
pub const PITCH_TEXT_LIMIT: usize = 2500;
/// Resume text sent with the career-gap prompt is cut to this many characters.
pub const GAP_TEXT_LIMIT: usize = 2000;

pub const PITCH_PROMPT: &str =
    "Summarize this resume into a 2-line professional pitch: {resume_text}";

pub const CAREER_GAP_PROMPT: &str = r#"Candidate wants to be a {target_job}.
Current Skills: {skills}.
Resume: {resume_text}.

1. List 3 missing skills.
2. Suggest one project."#;

/// Shown in place of the pitch when the summarizer is unavailable.
pub const PITCH_UNAVAILABLE: &str = "AI Service temporarily unavailable.";

/// Roles offered for the career-gap analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetJob {
    #[serde(rename = "Full Stack Developer")]
    FullStackDeveloper,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
    #[serde(rename = "Machine Learning Engineer")]
    MachineLearningEngineer,
    #[serde(rename = "UI/UX Designer")]
    UiUxDesigner,
}

impl TargetJob {
    pub fn label(&self) -> &'static str {
        match self {
            TargetJob::FullStackDeveloper => "Full Stack Developer",
            TargetJob::DataScientist => "Data Scientist",
            TargetJob::DevOpsEngineer => "DevOps Engineer",
            TargetJob::MachineLearningEngineer => "Machine Learning Engineer",
            TargetJob::UiUxDesigner => "UI/UX Designer",
        }
    }
}

/// First `limit` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn pitch_prompt(resume_text: &str) -> String {
    PITCH_PROMPT.replace(
        "{resume_text}",
        truncate_chars(resume_text, PITCH_TEXT_LIMIT),
    )
}

pub fn career_gap_prompt(target_job: TargetJob, skills: &[String], resume_text: &str) -> String {
    let skills = if skills.is_empty() {
        "none detected".to_string()
    } else {
        skills.join(", ")
    };
    CAREER_GAP_PROMPT
        .replace("{target_job}", target_job.label())
        .replace("{skills}", &skills)
        .replace("{resume_text}", truncate_chars(resume_text, GAP_TEXT_LIMIT))
}
