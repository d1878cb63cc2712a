//! Image synthesis error types.

/// Specific error conditions raised by the image synthesis service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ImageGenerationErrorKind {
    /// Request could not be delivered
    #[display("Image request failed: {}", _0)]
    Request(String),
    /// Upstream answered with a non-success HTTP status
    #[display("Image service returned HTTP {}: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Response did not contain any image URL
    #[display("Image service returned no image")]
    NoImage,
    /// Response body could not be decoded
    #[display("Malformed image response: {}", _0)]
    MalformedResponse(String),
}

/// Image synthesis error with location tracking.
///
/// Page-local and non-fatal: the page ends up `failed` and the session continues.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Generation Error: {} at line {} in {}", kind, line, file)]
pub struct ImageGenerationError {
    /// The kind of error that occurred
    pub kind: ImageGenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageGenerationError {
    /// Create a new image generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageGenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
