//! Generic client for OpenAI-compatible APIs.

use crate::openai_compat::{ApiErrorEnvelope, ChatResponse, conversions};
use async_trait::async_trait;
use marquee_core::{GenerateRequest, GenerateResponse};
use marquee_error::{ApiError, HttpError, JsonError, MarqueeResult};
use marquee_interface::CompletionDriver;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Chat completions endpoint of the OpenAI API.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Generic client for any OpenAI-compatible API.
///
/// # Examples
///
/// ```
/// use marquee_interface::CompletionDriver;
/// use marquee_models::OpenAICompatibleClient;
///
/// let client = OpenAICompatibleClient::openai("sk-test".to_string(), "gpt-4o-mini".to_string());
/// assert_eq!(client.provider_name(), "openai");
/// assert_eq!(client.model_name(), "gpt-4o-mini");
/// assert!(client.supports_vision());
/// ```
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider_name: &'static str,
    vision: bool,
}

impl OpenAICompatibleClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `model` - Default model identifier
    /// * `base_url` - Full chat completions URL
    /// * `provider_name` - Name of the provider (for logging/tracing)
    #[instrument(skip(api_key), fields(provider = provider_name, model = %model))]
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        provider_name: &'static str,
    ) -> Self {
        debug!(
            provider = provider_name,
            model = %model,
            url = %base_url,
            "Created OpenAI-compatible client"
        );

        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
            provider_name,
            vision: false,
        }
    }

    /// Client for the OpenAI API itself, with vision enabled.
    pub fn openai(api_key: String, model: String) -> Self {
        Self::new(api_key, model, OPENAI_CHAT_URL.to_string(), "openai").with_vision(true)
    }

    /// Applies a per-request timeout to every call.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the underlying client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> MarqueeResult<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Marks whether the endpoint accepts image inputs.
    pub fn with_vision(mut self, vision: bool) -> Self {
        self.vision = vision;
        self
    }

    /// Endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<ApiErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.to_string())
    }
}

#[async_trait]
impl CompletionDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = self.provider_name, model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> MarqueeResult<GenerateResponse> {
        let chat_request = conversions::to_chat_request(req, &self.model)?;

        debug!(
            provider = self.provider_name,
            model = %chat_request.model(),
            message_count = chat_request.messages().len(),
            "Sending request"
        );

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(
                    provider = self.provider_name,
                    timed_out = e.is_timeout(),
                    error = ?e,
                    "HTTP request failed"
                );
                if e.is_timeout() {
                    HttpError::timeout(format!("Request timed out: {}", e))
                } else {
                    HttpError::new(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = Self::error_message(&error_text);
            error!(
                provider = self.provider_name,
                status = %status,
                error = %message,
                "API error"
            );

            return Err(ApiError::new(status.as_u16(), message).into());
        }

        let body = response.text().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "Failed to read response body");
            HttpError::new(format!("Failed to read body: {}", e))
        })?;

        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "Failed to parse response");
            JsonError::new(format!("Failed to parse JSON: {}", e))
        })?;

        debug!(
            provider = self.provider_name,
            choices = chat_response.choices.len(),
            "Received response"
        );

        conversions::from_chat_response(&chat_response)
    }

    fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn supports_vision(&self) -> bool {
        self.vision
    }
}
