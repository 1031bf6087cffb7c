use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 下载远程文件错误
    Fetch(FetchError),
    /// 文件操作错误
    File(FileError),
    /// OCR / PDF 处理错误
    Ocr(OcrError),
    /// 语音合成错误
    Tts(TtsError),
    /// 请求参数错误
    Request(RequestError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Fetch(e) => write!(f, "下载错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Ocr(e) => write!(f, "OCR错误: {}", e),
            AppError::Tts(e) => write!(f, "语音合成错误: {}", e),
            AppError::Request(e) => write!(f, "请求错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Fetch(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Ocr(e) => Some(e),
            AppError::Tts(e) => Some(e),
            AppError::Request(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 下载远程文件错误
#[derive(Debug)]
pub enum FetchError {
    /// 网络请求失败
    RequestFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务器返回非 200 状态码
    BadStatus { url: String, status: u16 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::RequestFailed { url, source } => {
                write!(f, "Failed to download {}: {}", url, source)
            }
            FetchError::BadStatus { .. } => write!(f, "Failed to download image"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FetchError::BadStatus { .. } => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "File not found at path: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "Failed to write {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// OCR / PDF 处理错误
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("{engine} failed: {message}")]
    Engine { engine: String, message: String },

    #[error("Failed to run {command}: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Error processing PDF: {0}")]
    Pdf(String),

    #[error("All OCR engines failed ({attempts} tried), last error: {last}")]
    AllEnginesFailed { attempts: usize, last: String },

    #[error("No OCR engine configured")]
    NoEngine,
}

/// 语音合成错误
#[derive(Error, Debug)]
pub enum TtsError {
    #[error("{0} TTS model not loaded.")]
    ModelNotLoaded(&'static str),

    #[error("{backend} TTS backend error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("Text must not be empty")]
    EmptyText,
}

/// 请求参数错误
#[derive(Debug)]
pub enum RequestError {
    /// 缺少必需字段
    MissingField { field: String },
    /// multipart 表单无法读取
    InvalidMultipart {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingField { field } => write!(f, "Missing field: {}", field),
            RequestError::InvalidMultipart { source } => {
                write!(f, "Invalid multipart body: {}", source)
            }
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::InvalidMultipart { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            RequestError::MissingField { .. } => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件读取失败
    FileReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// 配置文件解析失败
    FileParseFailed {
        path: String,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileReadFailed { path, source } => {
                write!(f, "无法读取配置文件 {}: {}", path, source)
            }
            ConfigError::FileParseFailed { path, source } => {
                write!(f, "配置文件 {} 解析失败: {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::FileReadFailed { source, .. } => Some(source),
            ConfigError::FileParseFailed { source, .. } => Some(source),
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        AppError::Ocr(err)
    }
}

impl From<TtsError> for AppError {
    fn from(err: TtsError) -> Self {
        AppError::Tts(err)
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Request(RequestError::InvalidMultipart {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件不存在错误
    pub fn file_not_found(path: impl Into<String>) -> Self {
        AppError::File(FileError::NotFound { path: path.into() })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建下载请求失败错误
    pub fn fetch_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Fetch(FetchError::RequestFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建缺少字段错误
    pub fn missing_field(field: impl Into<String>) -> Self {
        AppError::Request(RequestError::MissingField {
            field: field.into(),
        })
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::File(FileError::NotFound { .. })
            | AppError::Fetch(FetchError::BadStatus { .. })
            | AppError::Request(_)
            | AppError::Tts(TtsError::EmptyText) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的错误描述（不含内部前缀）
    pub fn detail(&self) -> String {
        match self {
            AppError::Fetch(e) => e.to_string(),
            AppError::File(e) => e.to_string(),
            AppError::Ocr(e) => e.to_string(),
            AppError::Tts(e) => e.to_string(),
            AppError::Request(e) => e.to_string(),
            AppError::Config(e) => e.to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}

/// 错误响应体
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        let body = Json(ErrorResponse {
            detail: self.detail(),
        });

        (status, body).into_response()
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::file_not_found("/tmp/x.png").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Fetch(FetchError::BadStatus {
                url: "http://x".into(),
                status: 404
            })
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Tts(TtsError::ModelNotLoaded("ESPnet")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Ocr(OcrError::NoEngine).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_matches_client_messages() {
        assert_eq!(
            AppError::file_not_found("/tmp/x.png").detail(),
            "File not found at path: /tmp/x.png"
        );
        assert_eq!(
            AppError::Tts(TtsError::ModelNotLoaded("Coqui")).detail(),
            "Coqui TTS model not loaded."
        );
        assert_eq!(
            AppError::Fetch(FetchError::BadStatus {
                url: "http://x".into(),
                status: 500
            })
            .detail(),
            "Failed to download image"
        );
    }
}
