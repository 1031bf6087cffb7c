//! 选择题解析模块
//!
//! OCR 原始文本 → 按行切分 → 归一化 → 分类 → 组装 → 汇总报告。
//! 整个过程是纯函数，无 I/O，可在任意线程并发调用。

pub mod assembler;
pub mod classifier;
pub mod normalizer;
pub mod report;

pub use assembler::{assemble, extract_score, strip_choice_label};
pub use classifier::{classify, LineKind};
pub use normalizer::{clean_text, map_digit};
pub use report::build_report;

use crate::models::Report;

/// 默认行分隔符
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// 解析选项
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// 行分隔符（为空时回退到 `\n`）
    pub line_separator: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
        }
    }
}

impl ParseOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            line_separator: separator.into(),
        }
    }

    fn separator(&self) -> &str {
        if self.line_separator.is_empty() {
            DEFAULT_LINE_SEPARATOR
        } else {
            &self.line_separator
        }
    }
}

/// 将 OCR 文本解析为选择题报告（以 `\n` 分行）
pub fn parse_multiple_choice(text: &str) -> Report {
    parse_multiple_choice_with(text, &ParseOptions::default())
}

/// 使用自定义选项解析选择题报告
pub fn parse_multiple_choice_with(text: &str, options: &ParseOptions) -> Report {
    let questions = assemble(text.split(options.separator()));
    build_report(questions)
}
