/// 语音合成后端客户端
///
/// 封装对单个 TTS 后端（ESPnet / Coqui 模型服务）的 HTTP 调用
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::TtsError;

/// 语音合成后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtsBackend {
    /// ESPnet 预训练模型
    Espnet,
    /// Coqui TTS 预训练模型
    Coqui,
}

impl TtsBackend {
    /// 显示名称（用于错误信息）
    pub fn display_name(self) -> &'static str {
        match self {
            TtsBackend::Espnet => "ESPnet",
            TtsBackend::Coqui => "Coqui",
        }
    }

    /// 路由中使用的名称
    pub fn slug(self) -> &'static str {
        match self {
            TtsBackend::Espnet => "espnet",
            TtsBackend::Coqui => "coqui",
        }
    }
}

impl std::fmt::Display for TtsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
}

/// TTS 客户端
#[derive(Debug, Clone)]
pub struct TtsClient {
    backend: TtsBackend,
    client: reqwest::Client,
    base_url: String,
}

impl TtsClient {
    /// 创建新的 TTS 客户端
    pub fn new(backend: TtsBackend, base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            backend,
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn backend(&self) -> TtsBackend {
        self.backend
    }

    /// 请求后端合成语音
    ///
    /// # 返回
    /// 返回 wav 音频字节
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let url = format!("{}/synthesize", self.base_url);
        debug!("调用 {} 后端: {}，文本长度: {} 字符", self.backend, url, text.chars().count());

        let backend_error = |message: String| TtsError::Backend {
            backend: self.backend.display_name(),
            message,
        };

        let response = self
            .client
            .post(&url)
            .json(&SynthesizeRequest { text })
            .send()
            .await
            .map_err(|e| {
                warn!("{} 后端请求失败: {}", self.backend, e);
                backend_error(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(backend_error(format!("{}: {}", status, body)));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| backend_error(e.to_string()))?;

        if audio.is_empty() {
            return Err(backend_error("后端返回空音频".to_string()));
        }

        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(TtsBackend::Espnet.display_name(), "ESPnet");
        assert_eq!(TtsBackend::Coqui.slug(), "coqui");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let client = TtsClient::new(TtsBackend::Coqui, "http://127.0.0.1:9/", 2);
        let err = client.synthesize("سلام").await.unwrap_err();
        assert!(matches!(err, TtsError::Backend { backend: "Coqui", .. }));
    }
}
