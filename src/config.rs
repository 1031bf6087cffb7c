use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // --- 服务配置 ---
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// OCR 文本的行分隔符
    pub line_separator: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 外部 HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    // --- Tesseract 配置 ---
    pub tesseract_cmd: String,
    pub tesseract_lang: String,
    pub tesseract_oem: u8,
    pub tesseract_psm: u8,
    // --- 视觉模型 OCR 配置（可选，优先于 Tesseract）---
    pub vision_ocr_url: Option<String>,
    pub vision_ocr_model: String,
    // --- PDF 工具配置 ---
    pub pdfinfo_cmd: String,
    pub pdftotext_cmd: String,
    pub pdftoppm_cmd: String,
    pub pdf_render_dpi: u32,
    // --- 语音合成配置 ---
    /// 生成音频的输出目录
    pub tts_output_dir: String,
    pub espnet_tts_url: Option<String>,
    pub coqui_tts_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            line_separator: "\n".to_string(),
            verbose_logging: false,
            http_timeout_secs: 30,
            tesseract_cmd: "/usr/bin/tesseract".to_string(),
            tesseract_lang: "fas".to_string(),
            tesseract_oem: 3,
            tesseract_psm: 6,
            vision_ocr_url: None,
            vision_ocr_model: "llava".to_string(),
            pdfinfo_cmd: "pdfinfo".to_string(),
            pdftotext_cmd: "pdftotext".to_string(),
            pdftoppm_cmd: "pdftoppm".to_string(),
            pdf_render_dpi: 200,
            tts_output_dir: "outputs".to_string(),
            espnet_tts_url: None,
            coqui_tts_url: None,
        }
    }
}

/// TOML 配置文件，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub line_separator: Option<String>,
    pub verbose_logging: Option<bool>,
    pub http_timeout_secs: Option<u64>,
    pub tesseract_cmd: Option<String>,
    pub tesseract_lang: Option<String>,
    pub tesseract_oem: Option<u8>,
    pub tesseract_psm: Option<u8>,
    pub vision_ocr_url: Option<String>,
    pub vision_ocr_model: Option<String>,
    pub pdfinfo_cmd: Option<String>,
    pub pdftotext_cmd: Option<String>,
    pub pdftoppm_cmd: Option<String>,
    pub pdf_render_dpi: Option<u32>,
    pub tts_output_dir: Option<String>,
    pub espnet_tts_url: Option<String>,
    pub coqui_tts_url: Option<String>,
}

impl Config {
    /// 加载配置：默认值 → 配置文件（CONFIG_FILE）→ 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        Ok(base.merge_env(|name| std::env::var(name).ok()))
    }

    /// 仅从环境变量加载（未设置的字段使用默认值）
    pub fn from_env() -> Self {
        Self::default().merge_env(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载，未出现的字段使用默认值
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::FileParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 从 TOML 字符串加载
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(content)?;
        let default = Self::default();
        Ok(Self {
            host: file.host.unwrap_or(default.host),
            port: file.port.unwrap_or(default.port),
            line_separator: file.line_separator.unwrap_or(default.line_separator),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
            http_timeout_secs: file.http_timeout_secs.unwrap_or(default.http_timeout_secs),
            tesseract_cmd: file.tesseract_cmd.unwrap_or(default.tesseract_cmd),
            tesseract_lang: file.tesseract_lang.unwrap_or(default.tesseract_lang),
            tesseract_oem: file.tesseract_oem.unwrap_or(default.tesseract_oem),
            tesseract_psm: file.tesseract_psm.unwrap_or(default.tesseract_psm),
            vision_ocr_url: file.vision_ocr_url.or(default.vision_ocr_url),
            vision_ocr_model: file.vision_ocr_model.unwrap_or(default.vision_ocr_model),
            pdfinfo_cmd: file.pdfinfo_cmd.unwrap_or(default.pdfinfo_cmd),
            pdftotext_cmd: file.pdftotext_cmd.unwrap_or(default.pdftotext_cmd),
            pdftoppm_cmd: file.pdftoppm_cmd.unwrap_or(default.pdftoppm_cmd),
            pdf_render_dpi: file.pdf_render_dpi.unwrap_or(default.pdf_render_dpi),
            tts_output_dir: file.tts_output_dir.unwrap_or(default.tts_output_dir),
            espnet_tts_url: file.espnet_tts_url.or(default.espnet_tts_url),
            coqui_tts_url: file.coqui_tts_url.or(default.coqui_tts_url),
        })
    }

    /// 用环境变量覆盖当前配置，解析失败的值保持原样
    pub fn merge_env<F>(self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str, current: Option<String>| match var(name) {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v),
            None => current,
        };

        Self {
            host: var("HOST").unwrap_or(self.host),
            port: parse_var(&var, "PORT").unwrap_or(self.port),
            line_separator: var("LINE_SEPARATOR").unwrap_or(self.line_separator),
            verbose_logging: parse_var(&var, "VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            http_timeout_secs: parse_var(&var, "HTTP_TIMEOUT_SECS").unwrap_or(self.http_timeout_secs),
            tesseract_cmd: var("TESSERACT_CMD").unwrap_or(self.tesseract_cmd),
            tesseract_lang: var("TESSERACT_LANG").unwrap_or(self.tesseract_lang),
            tesseract_oem: parse_var(&var, "TESSERACT_OEM").unwrap_or(self.tesseract_oem),
            tesseract_psm: parse_var(&var, "TESSERACT_PSM").unwrap_or(self.tesseract_psm),
            vision_ocr_url: optional("VISION_OCR_URL", self.vision_ocr_url),
            vision_ocr_model: var("VISION_OCR_MODEL").unwrap_or(self.vision_ocr_model),
            pdfinfo_cmd: var("PDFINFO_CMD").unwrap_or(self.pdfinfo_cmd),
            pdftotext_cmd: var("PDFTOTEXT_CMD").unwrap_or(self.pdftotext_cmd),
            pdftoppm_cmd: var("PDFTOPPM_CMD").unwrap_or(self.pdftoppm_cmd),
            pdf_render_dpi: parse_var(&var, "PDF_RENDER_DPI").unwrap_or(self.pdf_render_dpi),
            tts_output_dir: var("TTS_OUTPUT_DIR").unwrap_or(self.tts_output_dir),
            espnet_tts_url: optional("ESPNET_TTS_URL", self.espnet_tts_url),
            coqui_tts_url: optional("COQUI_TTS_URL", self.coqui_tts_url),
        }
    }

    /// 监听地址字符串
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 读取并解析环境变量
fn parse_var<T, F>(var: &F, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(name).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.tesseract_lang, "fas");
        assert_eq!(config.tesseract_psm, 6);
        assert_eq!(config.line_separator, "\n");
        assert!(config.espnet_tts_url.is_none());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().merge_env(env_from(&[
            ("PORT", "9000"),
            ("TESSERACT_LANG", "fas+eng"),
            ("ESPNET_TTS_URL", "http://localhost:5002"),
            ("VERBOSE_LOGGING", "true"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.tesseract_lang, "fas+eng");
        assert_eq!(config.espnet_tts_url.as_deref(), Some("http://localhost:5002"));
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_invalid_env_value_keeps_current() {
        let config = Config::default().merge_env(env_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_empty_env_clears_optional_url() {
        let mut base = Config::default();
        base.coqui_tts_url = Some("http://tts".to_string());
        let config = base.merge_env(env_from(&[("COQUI_TTS_URL", "")]));
        assert!(config.coqui_tts_url.is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
            port = 8080
            tesseract_psm = 4
            vision_ocr_url = "http://localhost:11434"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.tesseract_psm, 4);
        assert_eq!(config.vision_ocr_url.as_deref(), Some("http://localhost:11434"));
        assert_eq!(config.tesseract_cmd, "/usr/bin/tesseract");
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadFailed { .. }));
    }
}
