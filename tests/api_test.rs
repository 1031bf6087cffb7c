use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;

use persian_ocr_api::error::OcrError;
use persian_ocr_api::infrastructure::OcrEngine;
use persian_ocr_api::{router, AppState, Config};

/// 固定返回一段试卷文本的引擎
struct MockEngine;

#[async_trait]
impl OcrEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
        Ok("1- (2 نمره) رنگ آسمان؟\nالف) قرمز\nب) آبی".to_string())
    }
}

fn app_with(config: Config) -> Router {
    let engines: Vec<Arc<dyn OcrEngine>> = vec![Arc::new(MockEngine)];
    router(AppState::with_engines(config, engines))
}

fn app() -> Router {
    app_with(Config::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = assert_ok!(app.oneshot(request).await);
    let status = response.status();
    let bytes = assert_ok!(axum::body::to_bytes(response.into_body(), usize::MAX).await);
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn file_url_query(path: &str) -> String {
    urlencoding::encode(&format!("file://{}", path)).into_owned()
}

#[tokio::test]
async fn test_parse_endpoint() {
    let (status, body) = send(
        app(),
        post_json("/parse", json!({ "text": "1. (2 score) What?\na) yes\nb) no" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "multiple_choice");
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["total_score"], 2.0);
    assert_eq!(body["questions"][0]["choices"]["الف"], "yes");
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["engines"], json!(["mock"]));
    assert_eq!(body["tts_backends"], json!([]));
}

#[tokio::test]
async fn test_ocr_json_with_local_file() {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"fake image").unwrap();

    let uri = format!("/ocr-json?image_url={}", file_url_query(&file.path().display().to_string()));
    let (status, body) = send(app(), post_empty(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["total_score"], 2.0);
    assert_eq!(body["questions"][0]["question_text"], "رنگ آسمان؟");
    assert_eq!(body["questions"][0]["choices"]["ب"], "آبی");
}

#[tokio::test]
async fn test_ocr_text_with_local_file() {
    let file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();

    let uri = format!("/ocr?image_url={}", file_url_query(&file.path().display().to_string()));
    let (status, body) = send(app(), post_empty(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["text"].as_str().unwrap_or("").starts_with("1- (2 نمره)"));
}

#[tokio::test]
async fn test_missing_file_is_bad_request() {
    let uri = format!("/ocr?image_url={}", file_url_query("/nonexistent/scan.png"));
    let (status, body) = send(app(), post_empty(&uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "File not found at path: /nonexistent/scan.png");
}

#[tokio::test]
async fn test_missing_image_url_is_bad_request() {
    let (status, body) = send(app(), post_empty("/ocr-json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing field: image_url");
}

#[tokio::test]
async fn test_upload_image() {
    let boundary = "X-BOUNDARY";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"scan.png\"\r\n\
         Content-Type: image/png\r\n\r\nfake image\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["text"].as_str().unwrap_or("").contains("الف) قرمز"));
}

#[tokio::test]
async fn test_tts_not_loaded() {
    for (uri, name) in [("/tts/espnet", "ESPnet"), ("/tts/coqui", "Coqui")] {
        let (status, body) = send(app(), post_json(uri, json!({ "text": "سلام" }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], format!("{} TTS model not loaded.", name));
    }
}

#[tokio::test]
async fn test_tts_empty_text_is_bad_request() {
    let mut config = Config::default();
    config.espnet_tts_url = Some("http://127.0.0.1:9".to_string());

    let (status, _) = send(
        app_with(config),
        post_json("/tts/espnet", json!({ "text": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
