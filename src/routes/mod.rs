//! HTTP 路由

pub mod health;
pub mod ocr;
pub mod parse;
pub mod tts;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// 上传文件大小上限
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// 构建完整路由
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ocr", post(ocr::ocr))
        .route("/upload", post(ocr::upload))
        .route("/ocr-json", post(ocr::ocr_json))
        .route("/parse", post(parse::parse))
        .route("/tts/espnet", post(tts::espnet))
        .route("/tts/coqui", post(tts::coqui))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
