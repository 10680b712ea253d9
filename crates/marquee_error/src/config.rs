//! Configuration errors.

/// Configuration could not be loaded or holds an invalid value.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is wrong
    pub message: String,
    /// Offending setting, when one can be named
    pub field: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Configuration error at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            field: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A setting holds a value outside its allowed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_field("temperature", "must be between 0 and 2, got 3");
    /// assert_eq!(err.field.as_deref(), Some("temperature"));
    /// assert!(err.message.starts_with("temperature must be"));
    /// ```
    #[track_caller]
    pub fn invalid_field(field: &str, problem: impl std::fmt::Display) -> Self {
        Self {
            field: Some(field.to_string()),
            ..Self::new(format!("{} {}", field, problem))
        }
    }
}
