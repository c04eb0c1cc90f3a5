pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::enhancement::handlers::handle_enhance;
use crate::ingest::handle_ingest;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .route("/api/v1/ats/coverage", post(handlers::handle_coverage))
        .route("/api/v1/ats/categorize", post(handlers::handle_categorize))
        .route(
            "/api/v1/ats/critical-keywords",
            post(handlers::handle_critical_keywords),
        )
        .route("/api/v1/ats/analyze", post(handlers::handle_analyze))
        // Resume API
        .route("/api/v1/resumes/ingest", post(handle_ingest))
        .route("/api/v1/resumes/enhance", post(handle_enhance))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::enhancement::DisabledRewriter;

    fn router_with(config: Config) -> Router {
        build_router(AppState {
            config,
            rewriter: Arc::new(DisabledRewriter),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        send_to(router_with(Config::default()), request).await
    }

    async fn send_to(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ats-api");
        assert_eq!(body["rewriter_configured"], false);
    }

    #[tokio::test]
    async fn test_score_endpoint() {
        let (status, body) = send(post_json(
            "/api/v1/ats/score",
            json!({
                "resume_text": "Python developer with Django and PostgreSQL",
                "jd_text": "Looking for a Python developer with Django, Kubernetes and AWS"
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let score = body["score"].as_u64().unwrap();
        assert!(score <= 100);
        assert!(body["missing_terms"].as_array().unwrap().len() <= 40);
        assert!(body["breakdown"]["blended"].is_number());
        assert!(body["band"].is_string());
    }

    #[tokio::test]
    async fn test_score_with_empty_jd_is_full_marks() {
        let (status, body) = send(post_json(
            "/api/v1/ats/score",
            json!({ "resume_text": "Rust engineer", "jd_text": "" }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 100);
        assert_eq!(body["missing_terms"], json!([]));
    }

    #[tokio::test]
    async fn test_score_rejects_empty_resume() {
        let (status, body) = send(post_json(
            "/api/v1/ats/score",
            json!({ "resume_text": "   ", "jd_text": "Rust engineer" }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_categorize_returns_all_buckets() {
        let (status, body) = send(post_json(
            "/api/v1/ats/categorize",
            json!({ "terms": ["python", "leadership", "jira", "banana"] }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Technical Skills"], json!(["python"]));
        assert_eq!(body["Soft Skills"], json!(["leadership"]));
        assert_eq!(body["Tools & Platforms"], json!(["jira"]));
        assert_eq!(body["Other"], json!(["banana"]));
    }

    #[tokio::test]
    async fn test_critical_keywords_rejects_zero_top_n() {
        let (status, _) = send(post_json(
            "/api/v1/ats/critical-keywords",
            json!({ "resume_text": "a", "jd_text": "b", "top_n": 0 }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_includes_coverage_and_sections() {
        let (status, body) = send(post_json(
            "/api/v1/ats/analyze",
            json!({
                "resume_text": "Experience: Python services. Education: BSc. Skills: Docker",
                "jd_text": "Python developer with Docker and Kubernetes experience"
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["score"].is_number());
        assert!(body["coverage"]["total_terms"].as_u64().unwrap() > 0);
        assert!(body["sections"]["found"]
            .as_array()
            .unwrap()
            .contains(&json!("Experience")));
    }

    #[tokio::test]
    async fn test_enhance_without_key_is_503() {
        let (status, body) = send(post_json(
            "/api/v1/resumes/enhance",
            json!({ "resume_text": "Rust engineer", "jd_text": "Rust role" }),
        ))
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "REWRITE_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_ingest_plain_text_upload() {
        let boundary = "X-BOUNDARY";
        let payload = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Jane Doe\nSkills: Rust, Go\n\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::post("/api/v1/resumes/ingest")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(payload))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_text"], "Jane Doe Skills Rust, Go");
        assert_eq!(body["word_count"], 5);
    }

    #[tokio::test]
    async fn test_ingest_rejects_unsupported_type() {
        let boundary = "X-BOUNDARY";
        let payload = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             PNG\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::post("/api/v1/resumes/ingest")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(payload))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_ingest_rejects_oversized_upload() {
        let boundary = "X-BOUNDARY";
        let payload = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {}\r\n\
             --{boundary}--\r\n",
            "rust ".repeat(800)
        );
        let request = Request::post("/api/v1/resumes/ingest")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(payload))
            .unwrap();

        let config = Config {
            max_upload_bytes: 64,
            ..Config::default()
        };
        let (status, body) = send_to(router_with(config), request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
