//! 日志初始化

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认日志过滤规则
const DEFAULT_FILTER: &str = "persian_ocr_api=info,tower_http=info";

/// 初始化全局日志
///
/// 优先使用 `RUST_LOG`；否则使用默认规则。重复调用不会 panic。
pub fn init() {
    init_with_verbose(false);
}

/// 初始化全局日志，`verbose` 为真时默认级别提升为 debug
pub fn init_with_verbose(verbose: bool) {
    let default = if verbose {
        "persian_ocr_api=debug,tower_http=debug"
    } else {
        DEFAULT_FILTER
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
