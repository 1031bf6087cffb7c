//! 语音合成端点

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::clients::TtsBackend;
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SpeechResponse {
    pub file_path: String,
}

/// POST /tts/espnet
pub async fn espnet(
    State(state): State<AppState>,
    Json(request): Json<SpeechRequest>,
) -> AppResult<Json<SpeechResponse>> {
    synthesize(&state, TtsBackend::Espnet, &request.text).await
}

/// POST /tts/coqui
pub async fn coqui(
    State(state): State<AppState>,
    Json(request): Json<SpeechRequest>,
) -> AppResult<Json<SpeechResponse>> {
    synthesize(&state, TtsBackend::Coqui, &request.text).await
}

async fn synthesize(
    state: &AppState,
    backend: TtsBackend,
    text: &str,
) -> AppResult<Json<SpeechResponse>> {
    let path = state.speech().synthesize_to_file(backend, text).await?;
    Ok(Json(SpeechResponse {
        file_path: path.display().to_string(),
    }))
}
