//! Completion provider integrations for Marquee.
//!
//! Only the OpenAI chat-completions wire format is implemented; any provider
//! that speaks it (OpenAI itself, Groq, local gateways) can be reached by
//! pointing [`OpenAICompatibleClient`] at a different base URL.

mod openai_compat;

pub use openai_compat::{
    ApiErrorBody, ApiErrorEnvelope, ChatChoice, ChatContent, ChatMessage, ChatRequest,
    ChatRequestBuilder, ChatResponse, ChatUsage, ContentPart, ImageUrl, OPENAI_CHAT_URL,
    OpenAICompatibleClient, ResponseMessage, from_chat_response, to_chat_request,
};
