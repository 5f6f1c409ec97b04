//! Conversion service - manual test cases to Gherkin, Gherkin to scripts

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::conversion::prompts::{
    gherkin_to_script_prompt, gherkin_to_script_schema, manual_to_gherkin_prompt,
    manual_to_gherkin_schema, SYSTEM_PROMPT,
};
use crate::domain::conversion::{
    GherkinToScriptInput, GherkinToScriptOutput, ManualToGherkinInput, ManualToGherkinOutput,
};
use crate::domain::{DomainError, LlmProvider, LlmRequest};
use crate::infrastructure::observability::{record_llm_request, LlmRequestMetricParams};

pub const AI_NOT_CONFIGURED: &str = "AI provider is not configured";

/// Runs the conversion flows against the configured text-completion provider
#[derive(Debug, Clone)]
pub struct ConversionService {
    provider: Option<Arc<dyn LlmProvider>>,
    model: String,
    temperature: Option<f32>,
}

impl ConversionService {
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        model: impl Into<String>,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn convert_manual_to_gherkin(
        &self,
        input: &ManualToGherkinInput,
    ) -> Result<ManualToGherkinOutput, DomainError> {
        let prompt = manual_to_gherkin_prompt(input)
            .map_err(|e| DomainError::internal(format!("Failed to render prompt: {}", e)))?;

        self.run(
            "manual_to_gherkin",
            prompt,
            "ManualToGherkinOutput",
            manual_to_gherkin_schema(),
        )
        .await
    }

    pub async fn convert_gherkin_to_script(
        &self,
        input: &GherkinToScriptInput,
    ) -> Result<GherkinToScriptOutput, DomainError> {
        let prompt = gherkin_to_script_prompt(input)
            .map_err(|e| DomainError::internal(format!("Failed to render prompt: {}", e)))?;

        self.run(
            "gherkin_to_script",
            prompt,
            "GherkinToScriptOutput",
            gherkin_to_script_schema(),
        )
        .await
    }

    async fn run<T: DeserializeOwned>(
        &self,
        flow: &'static str,
        prompt: String,
        schema_name: &str,
        schema: Value,
    ) -> Result<T, DomainError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| DomainError::configuration(AI_NOT_CONFIGURED))?;

        let request = LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(prompt)
            .maybe_temperature(self.temperature)
            .json_schema(schema_name, schema)
            .build();

        debug!(flow, model = %self.model, "Running conversion");

        let start = Instant::now();
        let result = provider.chat(&self.model, request).await;
        let usage = result.as_ref().ok().and_then(|r| r.usage.clone());

        record_llm_request(LlmRequestMetricParams {
            provider: provider.provider_name(),
            model: &self.model,
            flow,
            duration: start.elapsed(),
            success: result.is_ok(),
            input_tokens: usage.as_ref().map(|u| u64::from(u.prompt_tokens)),
            output_tokens: usage.as_ref().map(|u| u64::from(u.completion_tokens)),
        });

        let response = result.inspect_err(|e| warn!(flow, error = %e, "Conversion failed"))?;

        let output = parse_output(provider.provider_name(), response.content())?;
        info!(flow, "Conversion completed");
        Ok(output)
    }
}

/// Parse the model's JSON answer. Models sometimes wrap JSON in a Markdown
/// code fence even when asked not to.
fn parse_output<T: DeserializeOwned>(provider: &str, content: &str) -> Result<T, DomainError> {
    let trimmed = content.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    serde_json::from_str(json).map_err(|e| {
        DomainError::provider(
            provider,
            format!("Model returned output that does not match the expected schema: {}", e),
        )
    })
}
