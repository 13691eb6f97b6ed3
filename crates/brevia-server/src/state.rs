//! Shared application state.

use brevia_core::BreviaConfig;
use brevia_summarize::LlmConfig;
use parking_lot::RwLock;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: BreviaConfig,
    pub llm: RwLock<LlmConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: BreviaConfig) -> Self {
        let llm = LlmConfig::load(&config.data_paths.llm_config_file);
        Self {
            config,
            llm: RwLock::new(llm),
            http: reqwest::Client::new(),
        }
    }
}
