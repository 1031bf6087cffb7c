//! OCR 引擎 - 基础设施层
//!
//! 定义引擎 trait 以及两种实现：
//! - `TesseractEngine`：调用本地 tesseract 命令行
//! - `VisionOcrEngine`：调用兼容 Ollama 的视觉模型 API

use async_trait::async_trait;
use base64::Engine as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::config::Config;
use crate::error::OcrError;
use crate::infrastructure::temp_file::TempFile;

/// OCR 引擎
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// 引擎名称（用于日志和健康检查）
    fn name(&self) -> &'static str;

    /// 引擎当前是否可用
    async fn is_available(&self) -> bool;

    /// 识别图片中的文字
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}

/// Tesseract 命令行引擎
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
    language: String,
    oem: u8,
    psm: u8,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
            oem: 3,
            psm: 6,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            command: config.tesseract_cmd.clone(),
            language: config.tesseract_lang.clone(),
            oem: config.tesseract_oem,
            psm: config.tesseract_psm,
        }
    }

    /// 命令行参数（输入路径之后的部分）
    fn args(&self) -> Vec<String> {
        vec![
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
            "--oem".to_string(),
            self.oem.to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
        ]
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let input = TempFile::write("ocr_input", "png", image)
            .await
            .map_err(|e| OcrError::Engine {
                engine: self.name().to_string(),
                message: e.detail(),
            })?;

        debug!("运行 tesseract: {} {:?}", input.path().display(), self.args());

        let output = Command::new(&self.command)
            .arg(input.path())
            .args(self.args())
            .output()
            .await
            .map_err(|e| OcrError::CommandFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(OcrError::Engine {
                engine: self.name().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// 视觉模型引擎（Ollama `/api/generate` 接口）
#[derive(Debug, Clone)]
pub struct VisionOcrEngine {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl VisionOcrEngine {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn prompt() -> &'static str {
        "Extract all text from this image exactly as written. The text is in Persian. \
         Keep the original line breaks. Return only the extracted text, nothing else."
    }
}

#[async_trait]
impl OcrEngine for VisionOcrEngine {
    fn name(&self) -> &'static str {
        "vision"
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = serde_json::json!({
            "model": self.model,
            "prompt": Self::prompt(),
            "images": [base64::engine::general_purpose::STANDARD.encode(image)],
            "stream": false
        });

        let engine_error = |message: String| OcrError::Engine {
            engine: "vision".to_string(),
            message,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| engine_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(engine_error(format!("{} 返回 {}: {}", url, status, body)));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| engine_error(e.to_string()))?;

        Ok(result["response"].as_str().unwrap_or("").to_string())
    }
}

/// 根据配置构建引擎链（视觉模型在前，Tesseract 兜底）
pub fn engines_from_config(config: &Config) -> Vec<Arc<dyn OcrEngine>> {
    let mut engines: Vec<Arc<dyn OcrEngine>> = Vec::new();
    if let Some(url) = &config.vision_ocr_url {
        engines.push(Arc::new(VisionOcrEngine::new(
            url,
            &config.vision_ocr_model,
            config.http_timeout_secs,
        )));
    }
    engines.push(Arc::new(TesseractEngine::from_config(config)));
    engines
}
