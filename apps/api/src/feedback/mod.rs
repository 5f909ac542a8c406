//! User feedback: rating submissions and the per-score breakdown.

pub mod handlers;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::feedback::{FeedbackRow, RatingCount};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// Inserts a feedback entry. Append-only.
pub async fn insert_feedback(
    pool: &PgPool,
    name: &str,
    email: &str,
    score: i32,
    comments: &str,
) -> Result<FeedbackRow, sqlx::Error> {
    let row = sqlx::query_as::<_, FeedbackRow>(
        r#"
        INSERT INTO feedback (id, name, email, score, comments)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(score)
    .bind(comments)
    .fetch_one(pool)
    .await?;

    info!("Recorded feedback {} with score {}", row.id, row.score);
    Ok(row)
}

pub async fn list_feedback(pool: &PgPool) -> Result<Vec<FeedbackRow>, sqlx::Error> {
    sqlx::query_as::<_, FeedbackRow>("SELECT * FROM feedback ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn rating_counts(pool: &PgPool) -> Result<Vec<RatingCount>, sqlx::Error> {
    let counts = sqlx::query_as::<_, RatingCount>(
        "SELECT score, COUNT(*) AS count FROM feedback GROUP BY score ORDER BY score",
    )
    .fetch_all(pool)
    .await?;
    Ok(fill_missing_scores(counts))
}

/// Adds zero rows for scores nobody picked so clients always get 1..=5.
pub fn fill_missing_scores(counts: Vec<RatingCount>) -> Vec<RatingCount> {
    (MIN_SCORE..=MAX_SCORE)
        .map(|score| {
            let count = counts
                .iter()
                .find(|c| c.score == score)
                .map_or(0, |c| c.count);
            RatingCount { score, count }
        })
        .collect()
}
