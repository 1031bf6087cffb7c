//! 来源加载器 - 基础设施层
//!
//! 根据 URL 读取本地文件（`file://`）或下载远程文件，只返回字节，不做识别。

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{AppError, AppResult, FetchError};

/// 来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Image,
    Pdf,
}

impl SourceKind {
    /// 根据 URL 或文件名判断类型（忽略查询参数，大小写不敏感）
    pub fn detect(name: &str) -> Self {
        let path = name.split(['?', '#']).next().unwrap_or(name);
        if path.to_lowercase().ends_with(".pdf") {
            SourceKind::Pdf
        } else {
            SourceKind::Image
        }
    }
}

/// 已加载的来源
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub kind: SourceKind,
    pub bytes: Vec<u8>,
}

/// 来源加载器
///
/// 持有共享的 HTTP 客户端
#[derive(Clone)]
pub struct SourceLoader {
    client: reqwest::Client,
}

impl SourceLoader {
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// 加载 URL 指向的内容
    pub async fn load(&self, url: &str) -> AppResult<LoadedSource> {
        let bytes = match local_path(url) {
            Some(path) => {
                info!("正在读取本地文件: {}", path);
                read_local(&path).await?
            }
            None => self.download(url).await?,
        };

        debug!("已加载 {} 字节: {}", bytes.len(), url);

        Ok(LoadedSource {
            kind: SourceKind::detect(url),
            bytes,
        })
    }

    async fn download(&self, url: &str) -> AppResult<Vec<u8>> {
        info!("正在下载: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch_failed(url, e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AppError::Fetch(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::fetch_failed(url, e))?;
        Ok(bytes.to_vec())
    }
}

/// 解析 `file://` URL 为本地路径（百分号解码）
pub fn local_path(url: &str) -> Option<String> {
    let encoded = url.strip_prefix("file://")?;
    let decoded = urlencoding::decode(encoded)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| encoded.to_string());
    Some(decoded)
}

async fn read_local(path: &str) -> AppResult<Vec<u8>> {
    if !Path::new(path).exists() {
        return Err(AppError::file_not_found(path));
    }
    tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))
}
