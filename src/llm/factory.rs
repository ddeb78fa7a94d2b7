use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use tracing::{info, warn};

use super::completion_interface::CompletionClient;
use super::openai_compatible_llm::OpenAICompatibleLLM;
use crate::config::LlmConfig;

/// Create the completion client once at startup.
///
/// Returns `Ok(None)` when no API key is configured; the processor then
/// answers with the missing-key phrase instead of calling out.
pub fn create_completion_client(config: &LlmConfig) -> Result<Option<Arc<dyn CompletionClient>>> {
    let Some(api_key) = config.api_key() else {
        warn!("OPENAI_API_KEY not found in environment variables");
        return Ok(None);
    };

    info!("Initializing LLM: {}", config.model);
    let llm = OpenAICompatibleLLM::new(
        config.model.clone(),
        config.base_url.clone(),
        api_key.to_string(),
        config.temperature,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    Ok(Some(Arc::new(llm)))
}
