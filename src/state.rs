//! 共享应用状态

use std::sync::Arc;

use crate::config::Config;
use crate::infrastructure::{engines_from_config, OcrEngine, PdfToolkit, SourceLoader};
use crate::services::{DocumentService, SpeechService};
use crate::workflow::OcrFlow;

/// 共享应用状态
///
/// 启动后不可变，处理器之间只克隆 `Arc`
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    flow: OcrFlow,
    speech: SpeechService,
}

impl AppState {
    /// 根据配置创建状态（引擎链由配置决定）
    pub fn new(config: Config) -> Self {
        let engines = engines_from_config(&config);
        Self::with_engines(config, engines)
    }

    /// 使用指定的 OCR 引擎链创建状态
    pub fn with_engines(config: Config, engines: Vec<Arc<dyn OcrEngine>>) -> Self {
        let documents = DocumentService::new(engines, PdfToolkit::from_config(&config));
        let flow = OcrFlow::new(
            &config,
            SourceLoader::new(config.http_timeout_secs),
            documents,
        );
        let speech = SpeechService::new(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                flow,
                speech,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn flow(&self) -> &OcrFlow {
        &self.inner.flow
    }

    pub fn speech(&self) -> &SpeechService {
        &self.inner.speech
    }
}
