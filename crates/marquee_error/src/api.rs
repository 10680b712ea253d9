//! Provider API error types.

/// The completion API answered with a non-success status.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("API Error (status {}): {} at line {} in {}", status, message, line, file)]
pub struct ApiError {
    /// HTTP status code returned by the provider
    pub status: u16,
    /// Response body or provider message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ApiError {
    /// Create a new ApiError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_error::ApiError;
    ///
    /// let err = ApiError::new(429, "Too many requests");
    /// assert_eq!(err.status, 429);
    /// assert!(err.is_rate_limited());
    /// ```
    #[track_caller]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the provider rejected the call for exceeding a quota.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Whether the status indicates a transient server-side condition.
    pub fn is_transient(&self) -> bool {
        matches!(self.status, 408 | 429 | 500 | 502 | 503 | 504)
    }
}
