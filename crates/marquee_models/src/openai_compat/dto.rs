//! Data transfer objects for OpenAI-compatible APIs.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Image reference inside a content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// HTTP(S) URL or `data:` URL
    pub url: String,
}

/// One element of a multi-part message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text segment
    Text {
        /// The text
        text: String,
    },
    /// Image segment
    ImageUrl {
        /// Image location
        image_url: ImageUrl,
    },
}

/// Message content: a bare string or a list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    /// Plain text content
    Text(String),
    /// Multimodal content
    Parts(Vec<ContentPart>),
}

/// A message in the OpenAI chat format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: ChatContent,
}

/// OpenAI chat completion request.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatRequest {
    /// Creates a new builder for ChatRequest.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

/// Assistant message in a response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Role reported by the provider
    #[serde(default)]
    pub role: Option<String>,
    /// Generated text; absent for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// A choice in the OpenAI response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The message content
    pub message: ResponseMessage,
    /// Reason for finishing
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: Option<usize>,
    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: Option<usize>,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: Option<usize>,
}

/// OpenAI chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response choices
    pub choices: Vec<ChatChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// Error payload returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    /// Error details
    pub error: ApiErrorBody,
}

/// Error details inside [`ApiErrorEnvelope`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human readable message
    pub message: String,
    /// Error type, e.g. "invalid_request_error"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Provider error code
    #[serde(default)]
    pub code: Option<String>,
}
