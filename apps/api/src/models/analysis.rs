use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One analysed upload. Rows are inserted once and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeAnalysisRow {
    pub id: Uuid,
    pub submitter_name: String,
    pub submitter_email: String,
    pub submitter_mobile: String,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub candidate_phone: Option<String>,
    pub page_count: i32,
    pub experience_level: String,
    pub predicted_field: String,
    pub matched_skills: Vec<String>,
    pub recommended_skills: Vec<String>,
    /// `[{"name": ..., "url": ...}]`
    pub recommended_courses: Value,
    pub writing_score: i32,
    pub ai_summary: String,
    #[serde(skip_serializing)]
    pub resume_text: String,
    pub pdf_name: String,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
}
