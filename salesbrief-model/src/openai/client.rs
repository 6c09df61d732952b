//! OpenAI-compatible client implementation.

use super::config::{OPENAI_API_BASE, OpenAIConfig};
use super::convert::{self, ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use reqwest::Client;
use salesbrief_core::{BriefError, Llm, LlmRequest, LlmResponse};

/// Client for OpenAI-compatible chat completions endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use salesbrief_model::openai::{OpenAIClient, OpenAIConfig};
///
/// let client = OpenAIClient::new(OpenAIConfig::gpt4o_mini(
///     std::env::var("OPENAI_API_KEY").unwrap()
/// ))?;
/// ```
pub struct OpenAIClient {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIClient {
    /// Create a new client.
    pub fn new(config: OpenAIConfig) -> Result<Self, BriefError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BriefError::Model(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a client for the gpt-4o model.
    pub fn gpt4o(api_key: impl Into<String>) -> Result<Self, BriefError> {
        Self::new(OpenAIConfig::gpt4o(api_key))
    }

    /// Create a client for the gpt-4o-mini model.
    pub fn gpt4o_mini(api_key: impl Into<String>) -> Result<Self, BriefError> {
        Self::new(OpenAIConfig::gpt4o_mini(api_key))
    }

    /// Build the API URL for chat completions.
    fn api_url(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(OPENAI_API_BASE);
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    /// Build a chat completion request from an LLM request.
    fn build_request(&self, request: &LlmRequest) -> ChatCompletionRequest {
        let messages: Vec<_> = request.contents.iter().map(convert::content_to_message).collect();

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(convert::convert_tools(&request.tools))
        };

        let temperature = request.config.as_ref().and_then(|c| c.temperature);
        let top_p = request.config.as_ref().and_then(|c| c.top_p);
        let max_tokens = request
            .config
            .as_ref()
            .and_then(|c| c.max_output_tokens)
            .map(|t| t as u32)
            .or(self.config.max_tokens);

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature,
            top_p,
            max_tokens,
            tools,
        }
    }
}

#[async_trait]
impl Llm for OpenAIClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate_content(&self, request: LlmRequest) -> Result<LlmResponse, BriefError> {
        let api_url = self.api_url();
        let chat_request = self.build_request(&request);

        tracing::debug!(
            model = %self.config.model,
            messages = chat_request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| BriefError::Model(format!("Chat API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BriefError::Model(format!(
                "Chat API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| BriefError::Model(format!("Failed to read response: {}", e)))?;

        let chat_response: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                BriefError::Model(format!("Failed to parse response: {} - {}", e, response_text))
            })?;

        Ok(convert::from_response(&chat_response))
    }
}
