//! HTTP surface tests: the extraction endpoint driven through the router with
//! a scripted vision model.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use folio_cli::{AppState, build_router};
use folio_ingest::{Extractor, Pacing, VisionError, VisionModel};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

struct FakeVision {
    replies: Mutex<VecDeque<Result<String, VisionError>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeVision {
    fn new(replies: Vec<Result<&str, VisionError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(str::to_string)).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VisionModel for FakeVision {
    async fn describe_image(&self, image_base64: &str, _prompt: &str) -> Result<String, VisionError> {
        self.calls.lock().unwrap().push(image_base64.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

fn app(model: Arc<FakeVision>) -> axum::Router {
    let extractor = Extractor::new(model).with_pacing(Pacing::none());
    build_router(AppState::new(extractor), BODY_LIMIT)
}

async fn post_extract(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/extract-transactions")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_merges_pages_in_order() {
    let model = FakeVision::new(vec![
        Ok("```json\n{\"initial_balance\": 500, \"transactions\":[{\"date\":\"2024-01-02\",\"description\":\"Coffee\",\"type\":\"debit\",\"amount\":-4.5}]}\n```"),
        Ok(r#"{"transactions":[{"date":"2024-01-03","description":"Salary","type":"credit","amount":2000}]}"#),
    ]);

    let body = json!({ "images": ["imgA", "imgB"] }).to_string();
    let (status, json) = post_extract(app(model.clone()), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "initial_balance": 500.0,
            "transactions": [
                {"date": "2024-01-02", "description": "Coffee", "type": "debit", "amount": -4.5},
                {"date": "2024-01-03", "description": "Salary", "type": "credit", "amount": 2000}
            ]
        })
    );
    assert_eq!(*model.calls.lock().unwrap(), vec!["imgA".to_string(), "imgB".to_string()]);
}

#[tokio::test]
async fn test_unreadable_page_still_returns_ok() {
    let model = FakeVision::new(vec![
        Ok("Sorry, I cannot read this."),
        Ok(r#"{"initial_balance": 80, "transactions":[{"description":"Bus","amount":-2}]}"#),
    ]);

    let body = json!({ "images": ["a", "b"] }).to_string();
    let (status, json) = post_extract(app(model), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["initial_balance"], Value::Null);
    assert_eq!(json["transactions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_images_is_bad_request() {
    for body in [
        json!({}).to_string(),
        json!({ "images": "not-a-list" }).to_string(),
        json!({ "pages": ["a"] }).to_string(),
        "{ not json".to_string(),
    ] {
        let model = FakeVision::new(vec![]);
        let (status, json) = post_extract(app(model.clone()), body.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(json["error"].is_string());
        assert_eq!(model.call_count(), 0);
    }
}

#[tokio::test]
async fn test_upstream_failure_is_server_error_without_partial_data() {
    let model = FakeVision::new(vec![
        Ok(r#"{"initial_balance": 1, "transactions":[{"amount":1}]}"#),
        Err(VisionError::Transport("connection reset".to_string())),
        Ok(r#"{"transactions":[{"amount":3}]}"#),
    ]);

    let body = json!({ "images": ["a", "b", "c"] }).to_string();
    let (status, json) = post_extract(app(model.clone()), body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Failed to extract transaction data" }));
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn test_empty_image_list() {
    let model = FakeVision::new(vec![]);
    let (status, json) = post_extract(app(model.clone()), json!({ "images": [] }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "initial_balance": null, "transactions": [] }));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_health() {
    let response = app(FakeVision::new(vec![]))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "folio");
}

#[tokio::test]
async fn test_oversized_body_is_json_bad_request() {
    let model = FakeVision::new(vec![]);
    let extractor = Extractor::new(model.clone()).with_pacing(Pacing::none());
    let app = build_router(AppState::new(extractor), 1024);

    let body = json!({ "images": ["A".repeat(4096)] }).to_string();
    let (status, json) = post_extract(app, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(model.call_count(), 0);
}
