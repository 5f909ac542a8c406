use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::analysis::classifier::Classifier;
use crate::config::Config;
use crate::llm_client::Summarizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Pitch and career-gap text. `LlmClient` in production, fakes in tests.
    pub summarizer: Arc<dyn Summarizer>,
    /// Keyword and section tables, compiled once at startup.
    pub classifier: Arc<Classifier>,
    pub config: Config,
}
