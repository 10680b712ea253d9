//! Error types for the Marquee library.
//!
//! Every error records the source location where it was created. All types
//! are `Clone` so a single failure can be handed to every caller waiting on a
//! coalesced request.

mod api;
mod backend;
mod config;
mod http;
mod json;
mod task;

pub use api::ApiError;
pub use backend::BackendError;
pub use config::ConfigError;
pub use http::HttpError;
pub use json::JsonError;
pub use task::TaskError;

/// Crate-level error variants.
#[derive(Debug, Clone, derive_more::From, derive_more::Display)]
pub enum MarqueeErrorKind {
    /// Transport failure
    #[display("{_0}")]
    Http(HttpError),
    /// Non-success status from the provider
    #[display("{_0}")]
    Api(ApiError),
    /// Provider body that does not decode
    #[display("{_0}")]
    Json(JsonError),
    /// Unusable provider answer
    #[display("{_0}")]
    Backend(BackendError),
    /// Configuration error
    #[display("{_0}")]
    Config(ConfigError),
    /// Spawned operation that never finished
    #[display("{_0}")]
    Task(TaskError),
}

/// Marquee error with kind discrimination.
///
/// # Examples
///
/// ```
/// use marquee_error::{HttpError, MarqueeError, MarqueeErrorKind};
///
/// let err: MarqueeError = HttpError::new("timed out").into();
/// assert!(matches!(err.kind(), MarqueeErrorKind::Http(_)));
/// assert!(err.to_string().contains("timed out"));
/// ```
#[derive(Debug, Clone)]
pub struct MarqueeError(Box<MarqueeErrorKind>);

impl MarqueeError {
    /// Create a new error from a kind.
    pub fn new(kind: MarqueeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MarqueeErrorKind {
        &self.0
    }

    /// Whether retrying the same call later could succeed.
    ///
    /// Transport failures and transient API statuses are; malformed
    /// answers, configuration problems and dead tasks are not.
    pub fn is_transient(&self) -> bool {
        match self.kind() {
            MarqueeErrorKind::Http(_) => true,
            MarqueeErrorKind::Api(e) => e.is_transient(),
            MarqueeErrorKind::Json(_)
            | MarqueeErrorKind::Backend(_)
            | MarqueeErrorKind::Config(_)
            | MarqueeErrorKind::Task(_) => false,
        }
    }
}

impl std::fmt::Display for MarqueeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Marquee Error: {}", self.0)
    }
}

impl std::error::Error for MarqueeError {}

impl<T> From<T> for MarqueeError
where
    T: Into<MarqueeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Marquee operations.
pub type MarqueeResult<T> = std::result::Result<T, MarqueeError>;
