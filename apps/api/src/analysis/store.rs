use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::analysis::ResumeAnalysisRow;

/// Column values for a new analysis record.
pub struct NewAnalysis<'a> {
    pub id: Uuid,
    pub submitter_name: &'a str,
    pub submitter_email: &'a str,
    pub submitter_mobile: &'a str,
    pub candidate_name: &'a str,
    pub candidate_email: Option<&'a str>,
    pub candidate_phone: Option<&'a str>,
    pub page_count: i32,
    pub experience_level: &'a str,
    pub predicted_field: &'a str,
    pub matched_skills: &'a [String],
    pub recommended_skills: &'a [String],
    pub recommended_courses: &'a serde_json::Value,
    pub writing_score: i32,
    pub ai_summary: &'a str,
    pub resume_text: &'a str,
    pub pdf_name: &'a str,
    pub s3_key: &'a str,
}

/// Inserts an analysis record.
/// CRITICAL: This is append-only. Never UPDATE existing rows.
pub async fn insert_analysis(
    pool: &PgPool,
    new: NewAnalysis<'_>,
) -> Result<ResumeAnalysisRow, sqlx::Error> {
    let row = sqlx::query_as::<_, ResumeAnalysisRow>(
        r#"
        INSERT INTO resume_analyses
            (id, submitter_name, submitter_email, submitter_mobile,
             candidate_name, candidate_email, candidate_phone, page_count,
             experience_level, predicted_field, matched_skills, recommended_skills,
             recommended_courses, writing_score, ai_summary, resume_text, pdf_name, s3_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        RETURNING *
        "#,
    )
    .bind(new.id)
    .bind(new.submitter_name)
    .bind(new.submitter_email)
    .bind(new.submitter_mobile)
    .bind(new.candidate_name)
    .bind(new.candidate_email)
    .bind(new.candidate_phone)
    .bind(new.page_count)
    .bind(new.experience_level)
    .bind(new.predicted_field)
    .bind(new.matched_skills)
    .bind(new.recommended_skills)
    .bind(new.recommended_courses)
    .bind(new.writing_score)
    .bind(new.ai_summary)
    .bind(new.resume_text)
    .bind(new.pdf_name)
    .bind(new.s3_key)
    .fetch_one(pool)
    .await?;

    info!(
        "Recorded analysis {} (field: {}, score: {})",
        row.id, row.predicted_field, row.writing_score
    );
    Ok(row)
}

pub async fn get_analysis(pool: &PgPool, id: Uuid) -> Result<Option<ResumeAnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeAnalysisRow>("SELECT * FROM resume_analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All records, newest first.
pub async fn list_analyses(pool: &PgPool) -> Result<Vec<ResumeAnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeAnalysisRow>(
        "SELECT * FROM resume_analyses ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}
