//! PDF 工具 - 基础设施层
//!
//! 封装 poppler 命令行：pdfinfo（页数）、pdftotext（文本层）、pdftoppm（渲染为图片）

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::config::Config;
use crate::error::OcrError;

/// poppler 命令行封装
#[derive(Debug, Clone)]
pub struct PdfToolkit {
    pdfinfo_cmd: String,
    pdftotext_cmd: String,
    pdftoppm_cmd: String,
    dpi: u32,
}

impl PdfToolkit {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pdfinfo_cmd: config.pdfinfo_cmd.clone(),
            pdftotext_cmd: config.pdftotext_cmd.clone(),
            pdftoppm_cmd: config.pdftoppm_cmd.clone(),
            dpi: config.pdf_render_dpi,
        }
    }

    /// 获取页数
    pub async fn page_count(&self, pdf: &Path) -> Result<usize, OcrError> {
        let stdout = run(Command::new(&self.pdfinfo_cmd).arg(pdf), &self.pdfinfo_cmd).await?;
        parse_page_count(&String::from_utf8_lossy(&stdout))
            .ok_or_else(|| OcrError::Pdf("pdfinfo 输出中没有 Pages 行".to_string()))
    }

    /// 提取单页文本层（页码从 1 开始）
    pub async fn page_text(&self, pdf: &Path, page: usize) -> Result<String, OcrError> {
        let page = page.to_string();
        let stdout = run(
            Command::new(&self.pdftotext_cmd)
                .args(["-f", page.as_str(), "-l", page.as_str(), "-layout"])
                .arg(pdf)
                .arg("-"),
            &self.pdftotext_cmd,
        )
        .await?;
        Ok(String::from_utf8_lossy(&stdout).to_string())
    }

    /// 将单页渲染为 PNG（页码从 1 开始）
    ///
    /// # 参数
    /// - `out_prefix`: 输出文件前缀，实际文件为 `<out_prefix>.png`
    pub async fn render_page(
        &self,
        pdf: &Path,
        page: usize,
        out_prefix: &Path,
    ) -> Result<PathBuf, OcrError> {
        let page_arg = page.to_string();
        let dpi = self.dpi.to_string();
        run(
            Command::new(&self.pdftoppm_cmd)
                .args([
                    "-f",
                    page_arg.as_str(),
                    "-l",
                    page_arg.as_str(),
                    "-r",
                    dpi.as_str(),
                    "-png",
                    "-singlefile",
                ])
                .arg(pdf)
                .arg(out_prefix),
            &self.pdftoppm_cmd,
        )
        .await?;

        let rendered = out_prefix.with_extension("png");
        debug!("第 {} 页已渲染: {}", page, rendered.display());
        Ok(rendered)
    }
}

/// 运行命令并返回 stdout
async fn run(command: &mut Command, name: &str) -> Result<Vec<u8>, OcrError> {
    let output = command.output().await.map_err(|e| OcrError::CommandFailed {
        command: name.to_string(),
        message: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(OcrError::CommandFailed {
            command: name.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// 从 pdfinfo 输出中解析页数
pub fn parse_page_count(pdfinfo_output: &str) -> Option<usize> {
    pdfinfo_output
        .lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|rest| rest.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_count() {
        let output = "Title:          exam\nProducer:       x\nPages:          3\nEncrypted:      no\n";
        assert_eq!(parse_page_count(output), Some(3));
        assert_eq!(parse_page_count("Title: x\n"), None);
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let mut config = Config::default();
        config.pdfinfo_cmd = "/nonexistent/pdfinfo".to_string();
        let toolkit = PdfToolkit::from_config(&config);
        let err = toolkit.page_count(Path::new("/tmp/x.pdf")).await.unwrap_err();
        assert!(matches!(err, OcrError::CommandFailed { .. }));
    }
}
