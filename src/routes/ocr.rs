//! OCR 相关端点
//!
//! - POST /ocr?image_url=...      - 提取文本
//! - POST /upload                 - 上传文件并提取文本
//! - POST /ocr-json?image_url=... - 提取文本并解析为选择题报告

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::Report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OcrQuery {
    pub image_url: Option<String>,
}

impl OcrQuery {
    fn image_url(self) -> AppResult<String> {
        self.image_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("image_url"))
    }
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// POST /ocr
pub async fn ocr(
    State(state): State<AppState>,
    Query(query): Query<OcrQuery>,
) -> AppResult<Json<TextResponse>> {
    let url = query.image_url()?;
    let text = state.flow().extract_text(&url).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /upload
///
/// 读取 multipart 中名为 `file` 的字段，文件名决定按 PDF 还是图片处理
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<TextResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            debug!("忽略字段: {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        let text = state.flow().extract_upload(&file_name, &bytes).await?;
        return Ok(Json(TextResponse { text }));
    }

    Err(AppError::missing_field("file"))
}

/// POST /ocr-json
pub async fn ocr_json(
    State(state): State<AppState>,
    Query(query): Query<OcrQuery>,
) -> AppResult<Json<Report>> {
    let url = query.image_url()?;
    let report = state.flow().extract_report(&url).await?;
    Ok(Json(report))
}
