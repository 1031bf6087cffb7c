use axum::{extract::State, Json};
use serde::Deserialize;

use crate::models::Report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

/// POST /parse - 直接解析已有文本
pub async fn parse(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Json<Report> {
    Json(state.flow().parse("/parse", &request.text))
}
