//! OCR 处理流程 - 流程层
//!
//! 核心职责：定义"一个来源"的完整处理流程
//!
//! 流程顺序：
//! 1. 加载来源（本地文件 / 远程下载）
//! 2. 图片走 OCR 引擎链，PDF 逐页提取
//! 3. 按需解析为选择题报告

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{SourceKind, SourceLoader};
use crate::models::Report;
use crate::parser::{parse_multiple_choice_with, ParseOptions};
use crate::services::DocumentService;
use crate::utils::logging::log_report;
use crate::utils::truncate_text;

/// OCR 处理流程
///
/// - 不持有稀缺资源，只依赖 services
/// - 解析出零道题不是错误，只记录警告
pub struct OcrFlow {
    loader: SourceLoader,
    documents: DocumentService,
    parse_options: ParseOptions,
    verbose_logging: bool,
}

impl OcrFlow {
    pub fn new(config: &Config, loader: SourceLoader, documents: DocumentService) -> Self {
        Self {
            loader,
            documents,
            parse_options: ParseOptions::with_separator(config.line_separator.clone()),
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn documents(&self) -> &DocumentService {
        &self.documents
    }

    /// URL → 文本
    pub async fn extract_text(&self, url: &str) -> AppResult<String> {
        info!("📥 处理来源: {}", truncate_text(url, 80));
        let source = self.loader.load(url).await?;
        self.documents.extract_text(source.kind, &source.bytes).await
    }

    /// 上传的文件 → 文本（类型由文件名决定）
    pub async fn extract_upload(&self, file_name: &str, bytes: &[u8]) -> AppResult<String> {
        info!("📤 处理上传文件: {} ({} 字节)", file_name, bytes.len());
        self.documents
            .extract_text(SourceKind::detect(file_name), bytes)
            .await
    }

    /// URL → 文本 → 选择题报告
    pub async fn extract_report(&self, url: &str) -> AppResult<Report> {
        let text = self.extract_text(url).await?;
        Ok(self.parse(url, &text))
    }

    /// 文本 → 选择题报告
    pub fn parse(&self, origin: &str, text: &str) -> Report {
        let report = parse_multiple_choice_with(text, &self.parse_options);
        log_report(origin, &report, self.verbose_logging);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::infrastructure::{OcrEngine, PdfToolkit};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Arc;

    struct EchoEngine;

    #[async_trait]
    impl OcrEngine for EchoEngine {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
            Ok(String::from_utf8_lossy(image).to_string())
        }
    }

    fn flow(config: &Config) -> OcrFlow {
        let documents = DocumentService::new(
            vec![Arc::new(EchoEngine) as Arc<dyn OcrEngine>],
            PdfToolkit::from_config(config),
        );
        OcrFlow::new(config, SourceLoader::new(5), documents)
    }

    #[tokio::test]
    async fn test_extract_report_from_local_image() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        write!(file, "1- سوال اول (2 نمره)\nالف) یک\nب) دو\n").unwrap();
        let url = format!("file://{}", file.path().display());

        let report = flow(&Config::default()).extract_report(&url).await.unwrap();
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.total_score, 2.0);
        assert_eq!(report.questions[0].choices.len(), 2);
    }

    #[test]
    fn test_configured_separator() {
        let mut config = Config::default();
        config.line_separator = "|".to_string();
        let report = flow(&config).parse("test", "1- سوال|الف) یک|ب) دو");
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.questions[0].choices.len(), 2);
    }

    #[tokio::test]
    async fn test_upload_uses_file_name_kind() {
        let text = flow(&Config::default())
            .extract_upload("scan.PNG", "متن".as_bytes())
            .await
            .unwrap();
        assert_eq!(text, "متن");
    }
}
