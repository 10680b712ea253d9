//! Output types from completion responses.

use serde::{Deserialize, Serialize};

/// Supported output types from the completion API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Json(serde_json::Value),
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TokenUsageData {
    /// Tokens in the prompt
    input_tokens: u64,
    /// Tokens in the completion
    output_tokens: u64,
    /// Total tokens
    total_tokens: u64,
}

impl TokenUsageData {
    /// Creates usage data from raw counts.
    pub fn new(input_tokens: u64, output_tokens: u64, total_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}
