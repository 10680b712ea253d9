//! Transport failures.

/// The provider could not be reached or the response could not be read.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// What failed
    pub message: String,
    /// Whether the request exceeded its timeout
    pub timed_out: bool,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Transport failure at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_error::HttpError;
    ///
    /// let err = HttpError::new("connection refused");
    /// assert!(!err.is_timeout());
    /// assert!(err.to_string().starts_with("HTTP Error: connection refused"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            timed_out: false,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Request that ran past its deadline.
    #[track_caller]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            timed_out: true,
            ..Self::new(message)
        }
    }

    /// Whether the request exceeded its timeout.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}
