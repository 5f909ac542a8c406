//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::courses::DEFAULT_COURSE_COUNT;
use crate::analysis::pipeline::{build_analysis, DraftAnalysis};
use crate::analysis::prompts::{career_gap_prompt, TargetJob};
use crate::analysis::store::{get_analysis, insert_analysis, NewAnalysis};
use crate::documents::storage::{delete_original, store_original};
use crate::documents::{is_pdf, read_document};
use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_COACH_SYSTEM;
use crate::models::analysis::ResumeAnalysisRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Number of course recommendations, 1 to 10.
    pub courses: Option<usize>,
}

/// Multipart form of `POST /api/v1/analyses`.
#[derive(Debug)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub pdf_name: String,
    #[serde(flatten)]
    pub analysis: DraftAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct CareerGapRequest {
    pub target_job: TargetJob,
}

#[derive(Debug, Serialize)]
pub struct CareerGapResponse {
    pub analysis_id: Uuid,
    pub target_job: TargetJob,
    pub gap_analysis: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

/// Reads the `name`, `email`, `mobile` and `resume` fields. Unknown fields are ignored.
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut name = None;
    let mut email = None;
    let mut mobile = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" | "email" | "mobile" => {
                let value = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable field '{field_name}': {e}"))
                })?;
                let value = Some(value.trim().to_string());
                match field_name.as_str() {
                    "name" => name = value,
                    "email" => email = value,
                    _ => mobile = value,
                }
            }
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().map(str::to_string);
                if !is_pdf(&file_name, content_type.as_deref()) {
                    return Err(AppError::Validation(
                        "Only PDF resumes are accepted".to_string(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable resume file: {e}")))?;
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let name = required(name, "name")?;
    let email = required(email, "email")?;
    let mobile = required(mobile, "mobile")?;
    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Resume file is empty".to_string()));
    }

    Ok(Submission {
        name,
        email,
        mobile,
        file_name,
        bytes,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyses
///
/// Full pipeline: extract text → store PDF → profile → classify → courses →
/// pitch → append the record.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisResponse>), AppError> {
    let submission = read_submission(multipart).await?;
    let analysis_id = Uuid::new_v4();
    info!(
        "Analysing upload {} ({} bytes) as {}",
        submission.file_name,
        submission.bytes.len(),
        analysis_id
    );

    let document = read_document(submission.bytes.clone())
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read the PDF: {e}")))?;

    let s3_key = store_original(
        &state.s3,
        &state.config.s3_bucket,
        analysis_id,
        &submission.file_name,
        submission.bytes,
    )
    .await?;

    let mut rng = fastrand::Rng::new();
    let draft = build_analysis(
        &document,
        &submission.file_name,
        &state.classifier,
        state.summarizer.as_ref(),
        query.courses.unwrap_or(DEFAULT_COURSE_COUNT),
        &mut rng,
    )
    .await;

    let matched_skills: Vec<String> = draft.report.matched_skills.iter().cloned().collect();
    let recommended_courses = serde_json::to_value(&draft.recommended_courses)
        .map_err(|e| AppError::Internal(e.into()))?;

    let inserted = insert_analysis(
        &state.db,
        NewAnalysis {
            id: analysis_id,
            submitter_name: &submission.name,
            submitter_email: &submission.email,
            submitter_mobile: &submission.mobile,
            candidate_name: &draft.profile.name,
            candidate_email: draft.profile.email.as_deref(),
            candidate_phone: draft.profile.phone.as_deref(),
            page_count: i32::try_from(draft.profile.page_count).unwrap_or(i32::MAX),
            experience_level: draft.profile.experience_level.as_str(),
            predicted_field: draft.report.predicted_field.label(),
            matched_skills: &matched_skills,
            recommended_skills: &draft.report.recommended_skills,
            recommended_courses: &recommended_courses,
            writing_score: draft.report.writing_score as i32,
            ai_summary: &draft.ai_summary,
            resume_text: &document.text,
            pdf_name: &submission.file_name,
            s3_key: &s3_key,
        },
    )
    .await;

    let row = match inserted {
        Ok(row) => row,
        Err(e) => {
            discard_upload(&state, &s3_key).await;
            return Err(e.into());
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(AnalysisResponse {
            analysis_id: row.id,
            created_at: row.created_at,
            pdf_name: row.pdf_name,
            analysis: draft,
        }),
    ))
}

/// Best-effort removal of an upload whose record failed to insert.
async fn discard_upload(state: &AppState, s3_key: &str) {
    if let Err(e) = delete_original(&state.s3, &state.config.s3_bucket, s3_key).await {
        error!(
            "Orphaned upload left at s3://{}/{}: {e}",
            state.config.s3_bucket, s3_key
        );
    }
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeAnalysisRow>, AppError> {
    let row = get_analysis(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/analyses/:id/career-gap
///
/// Asks the summarizer which skills are missing for the target role.
pub async fn handle_career_gap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CareerGapRequest>,
) -> Result<Json<CareerGapResponse>, AppError> {
    let row = get_analysis(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let prompt = career_gap_prompt(request.target_job, &row.matched_skills, &row.resume_text);
    let gap_analysis = state
        .summarizer
        .summarize(&prompt, CAREER_COACH_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Career gap analysis failed: {e}")))?;

    Ok(Json(CareerGapResponse {
        analysis_id: id,
        target_job: request.target_job,
        gap_analysis,
    }))
}
