//! Mock completion driver with call accounting.

use async_trait::async_trait;
use marquee_core::{GenerateRequest, GenerateResponse};
use marquee_error::{ApiError, HttpError, MarqueeResult};
use marquee_interface::CompletionDriver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the mock does when called.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Answer with this text
    Respond(String),
    /// Fail with this HTTP status
    Status(u16),
    /// Fail with a transport error
    Disconnect,
}

/// Completion driver that replays a fixed behavior.
#[derive(Debug)]
pub struct MockDriver {
    behavior: MockBehavior,
    delay: Option<Duration>,
    vision: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

#[allow(dead_code)]
impl MockDriver {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            vision: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Respond(text.into()))
    }

    pub fn failing(status: u16) -> Self {
        Self::new(MockBehavior::Status(status))
    }

    /// Sleep before answering, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_vision(mut self) -> Self {
        self.vision = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl CompletionDriver for MockDriver {
    async fn generate(&self, request: &GenerateRequest) -> MarqueeResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::Respond(text) => Ok(GenerateResponse::from_text(text.clone())),
            MockBehavior::Status(status) => {
                Err(ApiError::new(*status, "mock provider error").into())
            }
            MockBehavior::Disconnect => Err(HttpError::new("connection reset").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }

    fn supports_vision(&self) -> bool {
        self.vision
    }
}
