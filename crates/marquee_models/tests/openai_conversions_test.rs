//! Tests for OpenAI request/response conversions.

use marquee_core::{GenerateRequest, Input, MediaSource, Message, Role};
use marquee_error::MarqueeErrorKind;
use marquee_models::{ChatResponse, from_chat_response, to_chat_request};
use serde_json::json;

fn text_request() -> GenerateRequest {
    GenerateRequest::builder()
        .messages(vec![
            Message::system("You write retail copy."),
            Message::user("Write 4 headlines."),
        ])
        .max_tokens(Some(200))
        .temperature(Some(0.8))
        .build()
        .expect("request builds")
}

#[test]
fn test_text_messages_use_string_content() {
    let chat = to_chat_request(&text_request(), "gpt-4o-mini").expect("converts");
    let value = serde_json::to_value(&chat).expect("serializes");

    assert_eq!(value["model"], "gpt-4o-mini");
    assert_eq!(value["max_tokens"], 200);
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][0]["content"], "You write retail copy.");
    assert_eq!(value["messages"][1]["role"], "user");
}

#[test]
fn test_unset_options_are_omitted() {
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hi")])
        .build()
        .expect("request builds");

    let value = serde_json::to_value(to_chat_request(&request, "m").expect("converts"))
        .expect("serializes");

    assert!(value.get("max_tokens").is_none());
    assert!(value.get("temperature").is_none());
}

#[test]
fn test_model_override_wins() {
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hi")])
        .model(Some("gpt-4o".to_string()))
        .build()
        .expect("request builds");

    let chat = to_chat_request(&request, "gpt-4o-mini").expect("converts");
    assert_eq!(chat.model(), "gpt-4o");
}

#[test]
fn test_image_messages_use_content_parts() {
    let message = Message::user_with_image("Analyze this image", "https://example.com/flyer.jpg");
    let request = GenerateRequest::builder()
        .messages(vec![message])
        .build()
        .expect("request builds");

    let value = serde_json::to_value(to_chat_request(&request, "gpt-4o-mini").expect("converts"))
        .expect("serializes");

    assert_eq!(
        value["messages"][0]["content"],
        json!([
            {"type": "text", "text": "Analyze this image"},
            {"type": "image_url", "image_url": {"url": "https://example.com/flyer.jpg"}}
        ])
    );
}

#[test]
fn test_base64_image_becomes_data_url() {
    let message = Message::new(
        Role::User,
        vec![Input::Image {
            mime: Some("image/png".to_string()),
            source: MediaSource::Base64("aGVsbG8=".to_string()),
        }],
    );
    let request = GenerateRequest::builder()
        .messages(vec![message])
        .build()
        .expect("request builds");

    let value = serde_json::to_value(to_chat_request(&request, "m").expect("converts"))
        .expect("serializes");

    assert_eq!(
        value["messages"][0]["content"][0]["image_url"]["url"],
        "data:image/png;base64,aGVsbG8="
    );
}

#[test]
fn test_empty_request_is_rejected() {
    let err = to_chat_request(&GenerateRequest::default(), "m").unwrap_err();
    assert!(matches!(err.kind(), MarqueeErrorKind::Backend(_)));
}

#[test]
fn test_response_text_and_usage() {
    let response: ChatResponse = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "  {\"headlines\": [\"A\"]}  "},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
    }))
    .expect("deserializes");

    let generated = from_chat_response(&response).expect("converts");

    assert_eq!(generated.text(), "{\"headlines\": [\"A\"]}");
    let usage = generated.usage().as_ref().expect("usage present");
    assert_eq!(*usage.total_tokens(), 20);
}

#[test]
fn test_response_without_choices_is_backend_error() {
    let response: ChatResponse =
        serde_json::from_value(json!({"choices": []})).expect("deserializes");

    let err = from_chat_response(&response).unwrap_err();
    assert!(matches!(err.kind(), MarqueeErrorKind::Backend(_)));
}

#[test]
fn test_null_content_is_backend_error() {
    let response: ChatResponse = serde_json::from_value(json!({
        "choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "content_filter"}]
    }))
    .expect("deserializes");

    let err = from_chat_response(&response).unwrap_err();
    assert!(err.to_string().contains("content_filter"));
}
