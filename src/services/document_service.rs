//! 文档识别服务 - 业务能力层
//!
//! 只负责"把图片或 PDF 字节变成文本"，不关心文本从哪里来、之后怎么解析

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{AppResult, OcrError};
use crate::infrastructure::{OcrEngine, PdfToolkit, SourceKind, TempFile};

/// PDF 中提取不到任何文本时的返回值
pub const NO_PDF_TEXT: &str = "No text could be extracted from the PDF";

/// 文档识别服务
///
/// 职责：
/// - 图片：按顺序尝试 OCR 引擎，第一个返回非空文本的引擎胜出
/// - PDF：逐页优先使用文本层，空白页渲染为图片后走 OCR
pub struct DocumentService {
    engines: Vec<Arc<dyn OcrEngine>>,
    pdf: PdfToolkit,
}

impl DocumentService {
    /// 创建新的文档识别服务
    pub fn new(engines: Vec<Arc<dyn OcrEngine>>, pdf: PdfToolkit) -> Self {
        Self { engines, pdf }
    }

    /// 已配置的引擎名称
    pub fn engine_names(&self) -> Vec<&'static str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    pub fn engines(&self) -> &[Arc<dyn OcrEngine>] {
        &self.engines
    }

    /// 按类型提取文本
    pub async fn extract_text(&self, kind: SourceKind, bytes: &[u8]) -> AppResult<String> {
        match kind {
            SourceKind::Image => Ok(self.recognize_image(bytes).await?),
            SourceKind::Pdf => self.extract_pdf(bytes).await,
        }
    }

    /// 识别图片
    ///
    /// 引擎失败时记录警告并尝试下一个；全部返回空白时结果为空字符串。
    pub async fn recognize_image(&self, image: &[u8]) -> Result<String, OcrError> {
        if self.engines.is_empty() {
            return Err(OcrError::NoEngine);
        }

        let mut failures = 0;
        let mut last_error = None;

        for engine in &self.engines {
            match engine.recognize(image).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("{} 识别出 {} 个字符", engine.name(), text.chars().count());
                    return Ok(text);
                }
                Ok(_) => {
                    info!("{} 未识别出文字，尝试下一个引擎", engine.name());
                }
                Err(e) => {
                    warn!("⚠️ {} 识别失败: {}", engine.name(), e);
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if failures == self.engines.len() => Err(OcrError::AllEnginesFailed {
                attempts: failures,
                last: e.to_string(),
            }),
            _ => Ok(String::new()),
        }
    }

    /// 提取 PDF 文本
    pub async fn extract_pdf(&self, pdf_bytes: &[u8]) -> AppResult<String> {
        let pdf_file = TempFile::write("ocr_pdf", "pdf", pdf_bytes).await?;
        let page_count = self
            .pdf
            .page_count(pdf_file.path())
            .await
            .map_err(|e| OcrError::Pdf(e.to_string()))?;

        info!("📄 PDF 共 {} 页", page_count);

        let mut text = String::new();
        for page in 1..=page_count {
            match self.pdf.page_text(pdf_file.path(), page).await {
                Ok(page_text) if !page_text.trim().is_empty() => {
                    text.push_str(&page_text);
                    text.push('\n');
                    continue;
                }
                Ok(_) => debug!("第 {} 页无文本层，转为图片识别", page),
                Err(e) => warn!("⚠️ 第 {} 页文本提取失败: {}，转为图片识别", page, e),
            }

            match self.ocr_pdf_page(pdf_file.path(), page).await {
                Ok(page_text) if !page_text.trim().is_empty() => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Ok(_) => debug!("第 {} 页未识别出文字", page),
                Err(e) => warn!("⚠️ 第 {} 页转换为图片失败: {}", page, e),
            }
        }

        if text.trim().is_empty() {
            Ok(NO_PDF_TEXT.to_string())
        } else {
            Ok(text)
        }
    }

    /// 渲染单页并识别
    async fn ocr_pdf_page(&self, pdf: &std::path::Path, page: usize) -> Result<String, OcrError> {
        let rendered = TempFile::reserve("ocr_pdf_page", "png");
        let prefix = rendered.path().with_extension("");
        self.pdf.render_page(pdf, page, &prefix).await?;

        let image = tokio::fs::read(rendered.path())
            .await
            .map_err(|e| OcrError::Pdf(format!("无法读取渲染结果: {}", e)))?;

        self.recognize_image(&image).await
    }
}
