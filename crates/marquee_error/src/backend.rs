//! Unusable provider answers.

/// The provider answered successfully, but not with anything usable.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", message, line, file)]
pub struct BackendError {
    /// What was wrong with the answer
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Backend error at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The response carried no choices.
    #[track_caller]
    pub fn no_choices() -> Self {
        Self::new("No choices in response")
    }

    /// The first choice carried no text.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_error::BackendError;
    ///
    /// let err = BackendError::empty_content(Some("length"));
    /// assert!(err.message.contains("finish_reason: length"));
    /// ```
    #[track_caller]
    pub fn empty_content(finish_reason: Option<&str>) -> Self {
        Self::new(format!(
            "Empty content in response (finish_reason: {})",
            finish_reason.unwrap_or("unknown")
        ))
    }
}
