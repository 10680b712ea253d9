//! Type conversions between Marquee and OpenAI formats.

use crate::openai_compat::{ChatContent, ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl};
use marquee_core::{GenerateRequest, GenerateResponse, Input, Output, TokenUsageData};
use marquee_error::{BackendError, MarqueeResult};

fn to_content(inputs: &[Input]) -> ChatContent {
    if let [Input::Text(text)] = inputs {
        return ChatContent::Text(text.clone());
    }

    let parts = inputs
        .iter()
        .map(|input| match input {
            Input::Text(text) => ContentPart::Text { text: text.clone() },
            Input::Image { mime, source } => ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: source.to_image_url(mime.as_deref()),
                },
            },
        })
        .collect();
    ChatContent::Parts(parts)
}

/// Converts a Marquee GenerateRequest to OpenAI chat format.
///
/// The request's model override wins over `default_model`.
///
/// # Errors
///
/// Returns a backend error if the request has no messages.
pub fn to_chat_request(req: &GenerateRequest, default_model: &str) -> MarqueeResult<ChatRequest> {
    if req.messages().is_empty() {
        return Err(BackendError::new("Request has no messages").into());
    }

    let messages: Vec<ChatMessage> = req
        .messages()
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role().as_str().to_string(),
            content: to_content(msg.content()),
        })
        .collect();

    let model = req
        .model()
        .clone()
        .unwrap_or_else(|| default_model.to_string());

    let mut builder = ChatRequest::builder();
    builder.model(model).messages(messages);

    if let Some(max_tokens) = req.max_tokens() {
        builder.max_tokens(*max_tokens);
    }

    if let Some(temp) = req.temperature() {
        builder.temperature(*temp);
    }

    builder
        .build()
        .map_err(|e| BackendError::new(format!("Failed to build request: {}", e)).into())
}

/// Converts an OpenAI chat response to a Marquee GenerateResponse.
///
/// # Errors
///
/// Returns a backend error when there are no choices or the first choice
/// carries no text.
pub fn from_chat_response(response: &ChatResponse) -> MarqueeResult<GenerateResponse> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| BackendError::no_choices())?;

    let content = choice
        .message
        .content
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| BackendError::empty_content(choice.finish_reason.as_deref()))?;

    // Extract token usage if available
    let usage = response.usage.as_ref().and_then(|u| {
        match (u.prompt_tokens, u.completion_tokens, u.total_tokens) {
            (Some(input), Some(output), Some(total)) => Some(TokenUsageData::new(
                input as u64,
                output as u64,
                total as u64,
            )),
            _ => None,
        }
    });

    GenerateResponse::builder()
        .outputs(vec![Output::Text(content.to_string())])
        .usage(usage)
        .build()
        .map_err(|e| BackendError::new(format!("Failed to build response: {}", e)).into())
}
