pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::admin;
use crate::analysis::handlers as analysis;
use crate::feedback::handlers as feedback;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.upload_limit_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyses", post(analysis::handle_create_analysis))
        .route("/api/v1/analyses/:id", get(analysis::handle_get_analysis))
        .route(
            "/api/v1/analyses/:id/career-gap",
            post(analysis::handle_career_gap),
        )
        // Feedback API
        .route("/api/v1/feedback", post(feedback::handle_submit_feedback))
        .route("/api/v1/feedback/ratings", get(feedback::handle_ratings))
        // Admin API
        .route("/api/v1/admin/analyses", get(admin::handle_list_analyses))
        .route(
            "/api/v1/admin/analyses/export",
            get(admin::handle_export_analyses),
        )
        .route("/api/v1/admin/feedback", get(admin::handle_list_feedback))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::classifier::Classifier;
    use crate::analysis::keywords::ClassifierTables;
    use crate::analysis::pipeline::tests::FakeSummarizer;
    use crate::config::tests::test_config;

    const BOUNDARY: &str = "analyzer-test-boundary";

    /// State whose pool and S3 client never connect. Only routes that fail
    /// before touching storage are exercised here.
    fn test_state() -> AppState {
        let config = test_config();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .endpoint_url(&config.s3_endpoint)
            .build();

        AppState {
            db,
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            summarizer: Arc::new(FakeSummarizer::replying("pitch")),
            classifier: Arc::new(Classifier::new(ClassifierTables::default()).unwrap()),
            config,
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyses")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "analyzer-api");
    }

    #[tokio::test]
    async fn test_analysis_without_resume_is_rejected() {
        let app = build_router(test_state());
        let body = multipart_body(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("mobile", "5550100"),
        ]);

        let response = app.oneshot(multipart_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "No resume file provided");
    }

    #[tokio::test]
    async fn test_analysis_missing_contact_field_is_rejected() {
        let app = build_router(test_state());
        let body = multipart_body(&[("name", "Ada"), ("email", "ada@example.com")]);

        let response = app.oneshot(multipart_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "mobile is required");
    }

    #[tokio::test]
    async fn test_analysis_rejects_non_pdf_upload() {
        let app = build_router(test_state());
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"cv.docx\"\r\n\
             Content-Type: application/vnd.openxmlformats-officedocument.wordprocessingml.document\r\n\r\n\
             not a pdf\r\n--{BOUNDARY}--\r\n"
        );

        let response = app.oneshot(multipart_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_requires_token() {
        let app = build_router(test_state());
        let response = app
            .clone()
            .oneshot(
                Request::get("/api/v1/admin/analyses")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                Request::get("/api/v1/admin/analyses/export")
                    .header(header::AUTHORIZATION, "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_closed_without_configured_token() {
        let mut state = test_state();
        state.config.admin_token = None;
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::get("/api/v1/admin/feedback")
                    .header(header::AUTHORIZATION, "Bearer admin-secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_feedback_score_out_of_range() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/v1/feedback")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Ada","email":"a@b.c","score":9}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analysis_id_must_be_uuid() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/analyses/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
