//! Input types for completion requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported input types to the completion API.
///
/// # Examples
///
/// ```
/// use marquee_core::{Input, MediaSource};
///
/// let text = Input::Text("Describe this storefront".to_string());
/// let image = Input::Image {
///     mime: Some("image/png".to_string()),
///     source: MediaSource::Url("https://example.com/front.png".to_string()),
/// };
/// assert!(text.as_text().is_some());
/// assert!(image.as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, GIF).
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (URL or base64)
        source: MediaSource,
    },
}

impl Input {
    /// Borrow the text of a text input.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Input::Text(text) => Some(text),
            Input::Image { .. } => None,
        }
    }
}
