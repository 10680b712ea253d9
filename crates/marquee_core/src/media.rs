//! Media source types for vision requests.

use serde::{Deserialize, Serialize};

/// Where image content is sourced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaSource {
    /// Publicly reachable URL the provider fetches itself
    Url(String),
    /// Base64-encoded content
    Base64(String),
}

impl MediaSource {
    /// Render the source as the string an `image_url` part expects.
    ///
    /// Base64 payloads become a data URL with the given MIME type
    /// (defaulting to JPEG).
    pub fn to_image_url(&self, mime: Option<&str>) -> String {
        match self {
            MediaSource::Url(url) => url.clone(),
            MediaSource::Base64(data) => {
                format!("data:{};base64,{}", mime.unwrap_or("image/jpeg"), data)
            }
        }
    }
}
