//! Pipeline control error types.

/// Error conditions raised by the stage controller itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Personalization input failed validation
    #[display("Invalid personalization: {}", _0)]
    InvalidPersonalization(String),
    /// Template document failed validation
    #[display("Invalid template: {}", _0)]
    InvalidTemplate(String),
    /// Caller cancelled the session
    #[display("Generation cancelled during {}", _0)]
    Cancelled(String),
    /// Draft edit referenced a page that does not exist
    #[display("Page {} does not exist", _0)]
    UnknownPage(u32),
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
