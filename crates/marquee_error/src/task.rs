//! Background task failures.

/// A spawned operation ended without producing its output.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Task Error: {} at line {} in {}", message, line, file)]
pub struct TaskError {
    /// What happened to the task
    pub message: String,
    /// Whether the task panicked rather than being cancelled
    pub panicked: bool,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TaskError {
    /// Task error at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>, panicked: bool) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            panicked,
            line: location.line(),
            file: location.file(),
        }
    }
}
