//! Completion driver trait.

use async_trait::async_trait;
use marquee_core::{GenerateRequest, GenerateResponse};
use marquee_error::MarqueeResult;

/// A chat-completion backend.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// concurrently.
#[async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Sends one completion request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unparseable response envelope.
    async fn generate(&self, request: &GenerateRequest) -> MarqueeResult<GenerateResponse>;

    /// Provider name for logs.
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;

    /// Whether the backend accepts image inputs.
    fn supports_vision(&self) -> bool {
        false
    }
}
