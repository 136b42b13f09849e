use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LLMConfig;
use crate::types::{AppResult, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Build the chat adapter from configuration; `None` when no API key is set
pub fn adapter_from_config(config: &LLMConfig) -> Option<Arc<dyn LLMAdapter>> {
    let api_key = config.active_api_key()?;
    Some(Arc::new(crate::llm::openai::OpenAIAdapter::with_base_url(
        api_key,
        &config.base_url,
    )))
}
