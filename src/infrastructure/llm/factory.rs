use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::gemini::GeminiProvider;
use super::http_client::HttpClient;
use crate::config::AiConfig;
use crate::domain::{DomainError, LlmProvider};

/// Builds the text-completion provider from configuration
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Gemini provider for the configured key, or `None` when no key is set
    pub fn from_config(config: &AiConfig) -> Result<Option<Arc<dyn LlmProvider>>, DomainError> {
        let Some(api_key) = config.resolved_api_key() else {
            warn!("No AI API key configured; conversion endpoints will be unavailable");
            return Ok(None);
        };

        let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
        let provider = GeminiProvider::with_base_url(client, api_key, &config.base_url);

        info!(model = %config.model, base_url = %config.base_url, "Gemini provider configured");
        Ok(Some(Arc::new(provider)))
    }
}
