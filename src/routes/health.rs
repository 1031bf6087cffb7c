//! 健康检查

use axum::{extract::State, Json};
use futures::future::join_all;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 当前可用的 OCR 引擎
    pub engines: Vec<&'static str>,
    /// 已加载的语音合成后端
    pub tts_backends: Vec<&'static str>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let engines = state.flow().documents().engines();
    let available = join_all(engines.iter().map(|engine| engine.is_available())).await;

    let engines = engines
        .iter()
        .zip(available)
        .filter(|(_, ok)| *ok)
        .map(|(engine, _)| engine.name())
        .collect();

    let tts_backends = state
        .speech()
        .loaded_backends()
        .into_iter()
        .map(|backend| backend.slug())
        .collect();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        engines,
        tts_backends,
    })
}
