pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::carousel::handlers as carousel;
use crate::chat::handlers as chat;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Testimonials
        .route("/api/v1/testimonials", get(carousel::handle_list))
        .route("/api/v1/testimonials/:index", get(carousel::handle_card_at))
        .route(
            "/api/v1/carousel",
            get(carousel::handle_live_card).post(carousel::handle_navigate),
        )
        // Résumé download
        .route("/api/v1/resume", get(resume::handle_get_resume))
        .route("/api/v1/resume/status", get(resume::handle_status))
        .route("/api/v1/resume/generate", post(resume::handle_generate))
        // Chat relay
        .route("/api/v1/chat", post(chat::handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::carousel::{default_testimonials, spawn_carousel, Carousel, RevealGuard};
    use crate::chat::ChatClient;
    use crate::config::Config;
    use crate::resume::render::PdfRenderer;
    use crate::resume::sink::DirectorySink;
    use crate::resume::{default_page_config, FontFamily, ResumeBuilder, ResumeDocument};

    fn test_state(dir: &TempDir, chat: Option<ChatClient>) -> AppState {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.output_dir = dir.path().to_path_buf();

        let carousel = spawn_carousel(
            Carousel::new(default_testimonials()).unwrap(),
            config.carousel_interval,
        )
        .unwrap();
        let builder = ResumeBuilder::new(
            Arc::new(PdfRenderer::new()),
            Arc::new(DirectorySink::new(dir.path())),
            default_page_config(FontFamily::Helvetica),
            config.status_reset_delay,
        );

        AppState {
            config,
            carousel: Arc::new(carousel),
            reveal: Arc::new(RevealGuard::new()),
            resume: Arc::new(ResumeDocument::sample()),
            resume_builder: Arc::new(builder),
            chat,
        }
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let (status, _, body) = call(app, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let app = build_router(test_state(&dir, None));
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio-api");
    }

    #[tokio::test]
    async fn test_list_and_wrapped_card_lookup() {
        let dir = TempDir::new().unwrap();
        let app = build_router(test_state(&dir, None));

        let (status, body) = get_json(app.clone(), "/api/v1/testimonials").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (status, card) = get_json(app.clone(), "/api/v1/testimonials/-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["index"], 3);
        assert_eq!(card["author"], "Michael Brown");

        let (_, card) = get_json(app, "/api/v1/testimonials/6").await;
        assert_eq!(card["author"], "Emily White");
    }

    #[tokio::test]
    async fn test_live_card_reveal_plays_once() {
        let dir = TempDir::new().unwrap();
        let app = build_router(test_state(&dir, None));

        let (_, first) = get_json(app.clone(), "/api/v1/carousel").await;
        assert_eq!(first["play_reveal"], true);
        assert_eq!(first["card"]["index"], 0);

        let (_, second) = get_json(app, "/api/v1/carousel").await;
        assert_eq!(second["play_reveal"], false);
    }

    #[tokio::test]
    async fn test_navigate_moves_live_carousel() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, None);
        let mut rx = state.carousel.state();
        let app = build_router(state);

        let request = post_json("/api/v1/carousel", json!({ "action": "jump_to", "index": 2 }));
        let (status, _, _) = call(app.clone(), request).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        rx.wait_for(|s| s.current_index == 2).await.unwrap();

        let request = post_json("/api/v1/carousel", json!({ "action": "previous" }));
        let (status, _, _) = call(app.clone(), request).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        rx.wait_for(|s| s.current_index == 1).await.unwrap();

        let (_, live) = get_json(app, "/api/v1/carousel").await;
        assert_eq!(live["card"]["author"], "John Smith");
        assert_eq!(live["card"]["transition"]["enter_x"], -1000);
    }

    #[tokio::test]
    async fn test_unknown_action_rejected() {
        let dir = TempDir::new().unwrap();
        let app = build_router(test_state(&dir, None));
        let request = post_json("/api/v1/carousel", json!({ "action": "shuffle" }));
        let (status, _, _) = call(app, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_generate_returns_pdf_attachment_and_saves_copy() {
        let dir = TempDir::new().unwrap();
        let app = build_router(test_state(&dir, None));

        let (_, before) = get_json(app.clone(), "/api/v1/resume/status").await;
        assert_eq!(before["status"], "idle");
        assert_eq!(before["trigger_enabled"], true);

        let request = Request::post("/api/v1/resume/generate")
            .body(Body::empty())
            .unwrap();
        let (status, headers, body) = call(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Fahad-Khan-Resume.pdf\""
        );
        assert!(body.starts_with(b"%PDF-1.5"));

        let saved = std::fs::read(dir.path().join("Fahad-Khan-Resume.pdf")).unwrap();
        assert_eq!(saved, body);

        let (_, after) = get_json(app, "/api/v1/resume/status").await;
        assert_eq!(after["status"], "success");
    }

    #[tokio::test]
    async fn test_generate_with_accented_name() {
        let dir = TempDir::new().unwrap();
        let mut state = test_state(&dir, None);
        state.resume = Arc::new(ResumeDocument {
            name: "Zoë Noël".to_string(),
            ..ResumeDocument::sample()
        });
        let app = build_router(state);

        let request = Request::post("/api/v1/resume/generate")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = call(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION].as_bytes(),
            "attachment; filename=\"Zoë-Noël-Resume.pdf\"".as_bytes()
        );
        assert!(dir.path().join("Zoë-Noël-Resume.pdf").exists());
    }

    #[tokio::test]
    async fn test_get_resume_record() {
        let dir = TempDir::new().unwrap();
        let app = build_router(test_state(&dir, None));
        let (status, body) = get_json(app, "/api/v1/resume").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Fahad Khan");
        assert!(!body["experience"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_unconfigured_and_empty_conversation() {
        let dir = TempDir::new().unwrap();
        let app = build_router(test_state(&dir, None));
        let request = post_json(
            "/api/v1/chat",
            json!({ "messages": [{ "role": "user", "content": "hi" }] }),
        );
        let (status, _, body) = call(app, request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "CHAT_UNAVAILABLE");

        // Validation happens before any request leaves the process.
        let client = ChatClient::new("http://127.0.0.1:9/api/chat").unwrap();
        let app = build_router(test_state(&dir, Some(client)));
        let request = post_json("/api/v1/chat", json!({ "messages": [] }));
        let (status, _, body) = call(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
