//! Request and response types for completion calls.

use crate::{Message, Output, TokenUsageData};
use serde::{Deserialize, Serialize};

/// Provider-neutral completion request.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// Conversation messages, system prompt first
    messages: Vec<Message>,
    /// Upper bound on completion tokens
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Model override; the driver's default model is used when unset
    model: Option<String>,
}

impl GenerateRequest {
    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateResponse {
    /// Outputs in provider order
    outputs: Vec<Output>,
    /// Token usage, when reported
    #[builder(default)]
    usage: Option<TokenUsageData>,
}

impl GenerateResponse {
    /// Returns a builder for constructing a GenerateResponse.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// Shorthand for a response holding one text output.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![Output::Text(text.into())],
            usage: None,
        }
    }

    /// Concatenated text of all outputs; JSON outputs are rendered compactly.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .map(|output| match output {
                Output::Text(text) => text.clone(),
                Output::Json(value) => value.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
