use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::feedback::{insert_feedback, rating_counts, MAX_SCORE, MIN_SCORE};
use crate::models::feedback::{FeedbackRow, RatingCount};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub score: i32,
    #[serde(default)]
    pub comments: String,
}

#[derive(Debug, Serialize)]
pub struct RatingsResponse {
    pub total: i64,
    pub ratings: Vec<RatingCount>,
}

pub fn validate_feedback(request: &FeedbackRequest) -> Result<(), AppError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&request.score) {
        return Err(AppError::Validation(format!(
            "score must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }
    Ok(())
}

/// POST /api/v1/feedback
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackRow>), AppError> {
    validate_feedback(&request)?;
    let row = insert_feedback(
        &state.db,
        request.name.trim(),
        request.email.trim(),
        request.score,
        request.comments.trim(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/feedback/ratings
pub async fn handle_ratings(
    State(state): State<AppState>,
) -> Result<Json<RatingsResponse>, AppError> {
    let ratings = rating_counts(&state.db).await?;
    Ok(Json(RatingsResponse {
        total: ratings.iter().map(|r| r.count).sum(),
        ratings,
    }))
}
