use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use crate::config::Config;
use crate::routes;
use crate::state::AppState;
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let state = AppState::new(config.clone());

        log_startup(&config, &state.flow().documents().engine_names());

        tokio::fs::create_dir_all(&config.tts_output_dir)
            .await
            .with_context(|| format!("无法创建音频输出目录: {}", config.tts_output_dir))?;

        Ok(Self { config, state })
    }

    /// 运行 HTTP 服务，直到收到退出信号
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("无法绑定地址: {}", addr))?;

        info!("✅ 服务已启动，监听 {}", addr);

        axum::serve(listener, routes::router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 服务已关闭");
        Ok(())
    }
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，开始优雅关闭..."),
        _ = terminate => info!("收到 SIGTERM，开始优雅关闭..."),
    }
}
