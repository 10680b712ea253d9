//! Generic OpenAI-compatible API client.
//!
//! Requests are sent as chat completions; text-only messages use the plain
//! string `content` form and messages carrying images use the content-part
//! array form.

mod client;
mod conversions;
mod dto;

pub use client::{OPENAI_CHAT_URL, OpenAICompatibleClient};
pub use conversions::{from_chat_response, to_chat_request};
pub use dto::{
    ApiErrorBody, ApiErrorEnvelope, ChatChoice, ChatContent, ChatMessage, ChatRequest,
    ChatRequestBuilder, ChatResponse, ChatUsage, ContentPart, ImageUrl, ResponseMessage,
};
