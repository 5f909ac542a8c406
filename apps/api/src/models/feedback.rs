use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedbackRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub score: i32,
    pub comments: String,
    pub created_at: DateTime<Utc>,
}

/// Number of feedback entries per rating.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RatingCount {
    pub score: i32,
    pub count: i64,
}
