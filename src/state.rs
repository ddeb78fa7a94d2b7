use std::sync::Arc;

use crate::config::Config;
use crate::llm::{create_completion_client, CompletionClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no API key is configured
    pub llm: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = create_completion_client(&config.llm_config)?;
        Ok(Self::with_client(config, llm))
    }

    /// Build state around an existing client handle
    pub fn with_client(config: Config, llm: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            config: Arc::new(config),
            llm,
        }
    }
}
