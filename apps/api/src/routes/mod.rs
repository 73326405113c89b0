pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::interview::handlers as interview_handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

/// Uploads are capped at 5 MB.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth_handlers::handle_register))
        .route("/api/auth/login", post(auth_handlers::handle_login))
        .route("/api/auth/me", get(auth_handlers::handle_me))
        .route("/api/user/profile", get(auth_handlers::handle_profile))
        // Resume
        .route(
            "/api/resume/upload",
            post(resume_handlers::handle_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/resume/analyses",
            get(resume_handlers::handle_list_analyses),
        )
        .route(
            "/api/resume/analyses/:id",
            get(resume_handlers::handle_get_analysis),
        )
        // Interview
        .route(
            "/api/interview/questions",
            post(interview_handlers::handle_questions),
        )
        .route(
            "/api/interview/evaluate",
            post(interview_handlers::handle_evaluate),
        )
        .route(
            "/api/interview/feedback",
            post(interview_handlers::handle_feedback),
        )
        .route(
            "/api/interview/history",
            get(interview_handlers::handle_history),
        )
        .route(
            "/api/interview/history/:id",
            get(interview_handlers::handle_get_interview),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;
    use crate::ai::service::AiService;
    use crate::config::Config;
    use crate::resume::extract::DOCX_MIME;
    use crate::store::MemoryStore;

    fn test_app() -> Router {
        let config = Config {
            anthropic_api_key: None,
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in_hours: 1,
            port: 0,
            cors_allowed_origin: None,
            rust_log: "info".to_string(),
        };
        build_router(AppState {
            store: Arc::new(MemoryStore::new()),
            ai: Arc::new(AiService::new(None)),
            config,
        })
    }

    async fn send_json(
        app: &Router,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
        let (status, body) = send_json(
            app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    fn docx_bytes(text: &str) -> Vec<u8> {
        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
               <w:body><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:body></w:document>"#
        );
        let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn multipart_upload(path: &str, token: &str, filename: &str, mime: &str, bytes: &[u8]) -> Request<Body> {
        const BOUNDARY: &str = "mockboard-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {mime}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app();
        let (status, body) = send_json(&app, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = test_app();
        for path in [
            "/api/auth/me",
            "/api/user/profile",
            "/api/interview/history",
            "/api/resume/analyses",
        ] {
            let (status, _) = send_json(&app, "GET", path, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "no 401 for {path}");
        }

        let (status, _) =
            send_json(&app, "GET", "/api/auth/me", Some("not-a-real-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let app = test_app();
        register(&app, "Alice", "alice@example.com", "secret1").await;
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": "Alice Again", "email": "ALICE@example.com", "password": "secret2" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("already registered"));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_rejected() {
        let app = test_app();
        register(&app, "Alice", "alice@example.com", "secret1").await;
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong!" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_interview_mode_rejected() {
        let app = test_app();
        let token = register(&app, "Alice", "alice@example.com", "secret1").await;
        let (status, body) = send_json(
            &app,
            "POST",
            "/api/interview/questions",
            Some(&token),
            Some(json!({ "mode": "casual" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("Invalid mode"));
    }

    /// Full interview lifecycle: register, login, start a technical
    /// interview, answer every question in order, finalize, read back from
    /// history.
    #[tokio::test]
    async fn test_full_interview_scenario() {
        let app = test_app();
        register(&app, "Alice", "alice@example.com", "secret1").await;

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/interview/questions",
            Some(&token),
            Some(json!({ "mode": "technical" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let interview_id = body["interviewId"].as_str().unwrap().to_string();
        let questions = body["questions"].as_array().unwrap().clone();
        assert_eq!(questions.len(), 5);

        for (i, question) in questions.iter().enumerate() {
            let (status, body) = send_json(
                &app,
                "POST",
                "/api/interview/evaluate",
                Some(&token),
                Some(json!({
                    "interviewId": interview_id,
                    "questionIndex": i,
                    "question": question,
                    "userAnswer": "I solved this with careful profiling and a rewrite.",
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert!(body["score"].as_u64().unwrap() <= 100);
            assert!(!body["feedback"].as_str().unwrap().is_empty());
        }

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/interview/feedback",
            Some(&token),
            Some(json!({ "interviewId": interview_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let depth = body["scores"]["technicalDepth"].as_u64().unwrap();
        assert!(depth <= 100);
        assert!(!body["overallFeedback"].as_str().unwrap().is_empty());
        assert!(body["improvementSuggestions"].as_array().unwrap().len() >= 3);

        let (status, body) = send_json(
            &app,
            "GET",
            &format!("/api/interview/history/{interview_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");
        assert_eq!(body["qa"].as_array().unwrap().len(), 5);

        let (status, body) =
            send_json(&app, "GET", "/api/interview/history", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_interviews_are_invisible_across_users() {
        let app = test_app();
        let alice = register(&app, "Alice", "alice@example.com", "secret1").await;
        let bob = register(&app, "Bob", "bob@example.com", "secret2").await;

        let (_, body) = send_json(
            &app,
            "POST",
            "/api/interview/questions",
            Some(&alice),
            Some(json!({ "mode": "hr" })),
        )
        .await;
        let interview_id = body["interviewId"].as_str().unwrap().to_string();

        let (status, _) = send_json(
            &app,
            "GET",
            &format!("/api/interview/history/{interview_id}"),
            Some(&bob),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/interview/evaluate",
            Some(&bob),
            Some(json!({
                "interviewId": interview_id,
                "questionIndex": 0,
                "question": "Q",
                "userAnswer": "A",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_upload_roundtrip() {
        let app = test_app();
        let token = register(&app, "Alice", "alice@example.com", "secret1").await;

        let resume_text = "Alice Example. Senior Rust engineer with five years of \
                           backend and distributed-systems experience.";
        let request = multipart_upload(
            "/api/resume/upload",
            &token,
            "alice-cv.docx",
            DOCX_MIME,
            &docx_bytes(resume_text),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        let analysis_id = body["_id"].as_str().unwrap().to_string();
        assert_eq!(body["originalFilename"], "alice-cv.docx");
        assert!(body["extractedText"]
            .as_str()
            .unwrap()
            .contains("Senior Rust engineer"));
        assert!(body["analysis"]["skills"].as_array().is_some());

        // list omits the extracted text
        let (status, body) =
            send_json(&app, "GET", "/api/resume/analyses", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert!(list[0].get("extractedText").is_none());

        // single-record lookup returns the full text
        let (status, body) = send_json(
            &app,
            "GET",
            &format!("/api/resume/analyses/{analysis_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["originalFilename"], "alice-cv.docx");
        assert!(body["extractedText"]
            .as_str()
            .unwrap()
            .contains("Senior Rust engineer"));
    }

    #[tokio::test]
    async fn test_resume_upload_rejects_unsupported_type() {
        let app = test_app();
        let token = register(&app, "Alice", "alice@example.com", "secret1").await;

        let request = multipart_upload(
            "/api/resume/upload",
            &token,
            "notes.txt",
            "text/plain",
            b"just some plain text, long enough to pass the length check easily",
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_interview_with_resume_context_links_analysis() {
        let app = test_app();
        let token = register(&app, "Alice", "alice@example.com", "secret1").await;

        let resume_text = "Alice Example. Senior Rust engineer with five years of \
                           backend and distributed-systems experience.";
        let request = multipart_upload(
            "/api/resume/upload",
            &token,
            "alice-cv.docx",
            DOCX_MIME,
            &docx_bytes(resume_text),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let analysis_id = body["_id"].as_str().unwrap().to_string();

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/interview/questions",
            Some(&token),
            Some(json!({ "mode": "behavioral", "resumeAnalysisId": analysis_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let interview_id = body["interviewId"].as_str().unwrap().to_string();

        let (_, body) = send_json(
            &app,
            "GET",
            &format!("/api/interview/history/{interview_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(body["resumeAnalysis"]["originalFilename"], "alice-cv.docx");
    }
}
