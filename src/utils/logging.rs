/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::{info, warn};

use crate::config::Config;
use crate::models::Report;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
/// - `engines`: 已启用的 OCR 引擎名称
pub fn log_startup(config: &Config, engines: &[&str]) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 Persian OCR API 启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 监听地址: {}", config.bind_addr());
    info!("🔤 OCR 引擎: {}", engines.join(" → "));
    info!(
        "🔊 语音合成: ESPnet {}, Coqui {}",
        backend_state(config.espnet_tts_url.as_deref()),
        backend_state(config.coqui_tts_url.as_deref())
    );
    info!("{}", "=".repeat(60));
}

fn backend_state(url: Option<&str>) -> &'static str {
    if url.is_some() {
        "已配置"
    } else {
        "未配置"
    }
}

/// 记录解析报告摘要
///
/// # 参数
/// - `origin`: 文本来源（URL 或文件名）
/// - `report`: 解析报告
/// - `verbose`: 是否逐题输出
pub fn log_report(origin: &str, report: &Report, verbose: bool) {
    if report.is_empty() {
        warn!("⚠️ {} 未解析出任何题目", truncate_text(origin, 80));
        return;
    }

    info!(
        "✓ {} 解析完成: {} 道题, 总分 {}",
        truncate_text(origin, 80),
        report.total_questions,
        report.total_score
    );

    if verbose {
        for question in &report.questions {
            info!("  {}", question);
        }
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
