//! Admin API: record listings and the CSV export, behind a bearer token.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::analysis::store::list_analyses;
use crate::errors::AppError;
use crate::feedback::list_feedback;
use crate::models::analysis::ResumeAnalysisRow;
use crate::models::feedback::FeedbackRow;
use crate::state::AppState;

const EXPORT_HEADERS: [&str; 15] = [
    "ID",
    "Submitted At",
    "Name",
    "Email",
    "Mobile",
    "Candidate Name",
    "Candidate Email",
    "Candidate Phone",
    "Pages",
    "Experience Level",
    "Predicted Field",
    "Skills",
    "Recommended Skills",
    "Resume Score",
    "PDF Name",
];

/// Checks `Authorization: Bearer <token>` against the configured admin token.
///
/// Without a configured token the admin API is closed.
pub fn require_admin(headers: &HeaderMap, admin_token: Option<&str>) -> Result<(), AppError> {
    let Some(expected) = admin_token.filter(|t| !t.is_empty()) else {
        warn!("Admin request rejected: ADMIN_TOKEN is not configured");
        return Err(AppError::Forbidden);
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// GET /api/v1/admin/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ResumeAnalysisRow>>, AppError> {
    require_admin(&headers, state.config.admin_token.as_deref())?;
    let rows = list_analyses(&state.db).await?;
    info!("Admin listed {} analyses", rows.len());
    Ok(Json(rows))
}

/// GET /api/v1/admin/analyses/export
pub async fn handle_export_analyses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    require_admin(&headers, state.config.admin_token.as_deref())?;
    let rows = list_analyses(&state.db).await?;
    let body = analyses_to_csv(&rows)?;
    info!("Exported {} analyses as CSV", rows.len());

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"resume_analyses.csv\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET /api/v1/admin/feedback
pub async fn handle_list_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<FeedbackRow>>, AppError> {
    require_admin(&headers, state.config.admin_token.as_deref())?;
    Ok(Json(list_feedback(&state.db).await?))
}

/// Flattens records into CSV. List columns are joined with "; ".
pub fn analyses_to_csv(rows: &[ResumeAnalysisRow]) -> Result<String, AppError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADERS).map_err(csv_error)?;

    for row in rows {
        wtr.write_record([
            row.id.to_string(),
            row.created_at.to_rfc3339(),
            row.submitter_name.clone(),
            row.submitter_email.clone(),
            row.submitter_mobile.clone(),
            row.candidate_name.clone(),
            row.candidate_email.clone().unwrap_or_default(),
            row.candidate_phone.clone().unwrap_or_default(),
            row.page_count.to_string(),
            row.experience_level.clone(),
            row.predicted_field.clone(),
            row.matched_skills.join("; "),
            row.recommended_skills.join("; "),
            row.writing_score.to_string(),
            row.pdf_name.clone(),
        ])
        .map_err(csv_error)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.into()))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(e.into())
}
