//! 语音合成服务 - 业务能力层
//!
//! 只负责"把文本变成磁盘上的 wav 文件"

use std::path::PathBuf;
use tracing::info;

use crate::clients::{TtsBackend, TtsClient};
use crate::config::Config;
use crate::error::{AppError, AppResult, TtsError};

/// 语音合成服务
pub struct SpeechService {
    espnet: Option<TtsClient>,
    coqui: Option<TtsClient>,
    output_dir: PathBuf,
}

impl SpeechService {
    /// 根据配置创建；未配置地址的后端视为模型未加载
    pub fn new(config: &Config) -> Self {
        let client = |backend, url: &Option<String>| {
            url.as_ref()
                .map(|u| TtsClient::new(backend, u, config.http_timeout_secs))
        };

        Self {
            espnet: client(TtsBackend::Espnet, &config.espnet_tts_url),
            coqui: client(TtsBackend::Coqui, &config.coqui_tts_url),
            output_dir: PathBuf::from(&config.tts_output_dir),
        }
    }

    /// 已加载的后端
    pub fn loaded_backends(&self) -> Vec<TtsBackend> {
        [&self.espnet, &self.coqui]
            .into_iter()
            .flatten()
            .map(|c| c.backend())
            .collect()
    }

    fn client(&self, backend: TtsBackend) -> Option<&TtsClient> {
        match backend {
            TtsBackend::Espnet => self.espnet.as_ref(),
            TtsBackend::Coqui => self.coqui.as_ref(),
        }
    }

    /// 合成语音并写入输出目录
    ///
    /// # 返回
    /// 返回生成的 wav 文件路径
    pub async fn synthesize_to_file(&self, backend: TtsBackend, text: &str) -> AppResult<PathBuf> {
        let client = self
            .client(backend)
            .ok_or(TtsError::ModelNotLoaded(backend.display_name()))?;

        if text.trim().is_empty() {
            return Err(TtsError::EmptyText.into());
        }

        let audio = client.synthesize(text).await?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let path = self
            .output_dir
            .join(format!("{}.wav", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, &audio)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("🔊 {} 已生成音频: {}", backend, path.display());
        Ok(path)
    }
}
