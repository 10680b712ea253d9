//! Chat messages sent to a completion provider.

use crate::{Input, MediaSource, Role};
use serde::{Deserialize, Serialize};

/// One turn of a completion request: a role and its ordered inputs.
///
/// Copy prompts are a system turn followed by a user turn; image analysis
/// adds an image to the user turn.
///
/// # Examples
///
/// ```
/// use marquee_core::{Message, Role};
///
/// let prompt = Message::user_with_image("Describe this storefront", "https://example.com/a.jpg");
///
/// assert_eq!(*prompt.role(), Role::User);
/// assert!(prompt.has_image());
/// assert_eq!(prompt.text_content(), "Describe this storefront");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Message {
    /// Sender
    role: Role,
    /// Text and image inputs, in order
    content: Vec<Input>,
}

impl Message {
    /// Message with arbitrary inputs.
    pub fn new(role: Role, content: Vec<Input>) -> Self {
        Self { role, content }
    }

    /// System instructions.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, vec![Input::Text(text.into())])
    }

    /// Plain user prompt.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Input::Text(text.into())])
    }

    /// User prompt followed by one image the provider fetches by URL.
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self::new(
            Role::User,
            vec![
                Input::Text(text.into()),
                Input::Image {
                    mime: None,
                    source: MediaSource::Url(image_url.into()),
                },
            ],
        )
    }

    /// Whether any input in this message is an image.
    pub fn has_image(&self) -> bool {
        self.content
            .iter()
            .any(|input| matches!(input, Input::Image { .. }))
    }

    /// Text inputs joined by newlines.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(Input::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
