//! # Persian OCR API
//!
//! 波斯语试卷 OCR 服务：图片 / PDF 转文本、选择题解析、语音合成
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 纯解析层（Parser）
//! - `parser/` - 无 I/O 的选择题解析器
//! - `normalizer` → `classifier` → `assembler` → `report`
//!
//! ### ② 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `SourceLoader` - 读取 `file://` 或下载远程文件
//! - `OcrEngine` - Tesseract 命令行 / 视觉模型
//! - `PdfToolkit` - poppler 命令行
//! - `clients/TtsClient` - 语音合成后端
//!
//! ### ③ 业务能力层（Services）
//! - `DocumentService` - 字节 → 文本（引擎链兜底）
//! - `SpeechService` - 文本 → wav 文件
//!
//! ### ④ 流程层（Workflow）
//! - `OcrFlow` - URL → 字节 → 文本 → 报告
//!
//! ### ⑤ 接口层（Routes）
//! - `routes/` - axum 路由与处理器，`AppState` 在处理器间共享
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod parser;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ChoiceLabel, Choices, Question, Report};
pub use parser::{parse_multiple_choice, parse_multiple_choice_with, ParseOptions};
pub use routes::router;
pub use state::AppState;
pub use workflow::OcrFlow;
