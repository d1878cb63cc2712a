//! Story generation error types.
//!
//! A story generation failure is the only fatal error in a generation session:
//! it aborts the session at the Writing stage and is surfaced to the caller.

/// Specific error conditions raised while producing the narrative text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryGenerationErrorKind {
    /// Transport failure or upstream error, message passed through verbatim
    #[display("{}", _0)]
    Upstream(String),
    /// Upstream call timed out
    #[display("{}", _0)]
    Timeout(String),
    /// Upstream answered with a non-success HTTP status
    #[display("Story service returned HTTP {}: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Payload did not parse into a story
    #[display("Malformed story response: {}", _0)]
    MalformedResponse(String),
    /// Response carried no story at all
    #[display("Story service returned no story")]
    MissingStory,
    /// Story has an empty page list
    #[display("Story service returned no pages")]
    EmptyPages,
    /// Story page count differs from the template
    #[display("Story has {} pages but the template defines {}", actual, expected)]
    PageCountMismatch {
        /// Page count of the template
        expected: usize,
        /// Page count of the generated story
        actual: usize,
    },
    /// A page came back without body text
    #[display("Story page {} has no text", _0)]
    EmptyPageText(u32),
    /// Page numbers are not the contiguous sequence 1..=N
    #[display("Story page at position {} is numbered {}", position, found)]
    PageNumbering {
        /// Zero-based position after sorting
        position: usize,
        /// Page number found at that position
        found: u32,
    },
}

/// Story generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryGenerationError, StoryGenerationErrorKind};
///
/// let err = StoryGenerationError::new(StoryGenerationErrorKind::Timeout(
///     "request timed out".to_string(),
/// ));
/// assert_eq!(err.message(), "request timed out");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Generation Error: {} at line {} in {}", kind, line, file)]
pub struct StoryGenerationError {
    /// The specific error condition
    pub kind: StoryGenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryGenerationError {
    /// Create a new StoryGenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryGenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// User-facing message without location information.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
