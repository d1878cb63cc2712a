//! Face swap error types.

/// Specific error conditions raised by the face swap service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FaceSwapErrorKind {
    /// Request could not be delivered
    #[display("Face swap request failed: {}", _0)]
    Request(String),
    /// Upstream answered with a non-success HTTP status
    #[display("Face swap service returned HTTP {}: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Response body could not be decoded
    #[display("Malformed face swap response: {}", _0)]
    MalformedResponse(String),
}

/// Face swap error with location tracking.
///
/// Never surfaced to the end caller; the orchestrator falls back to the
/// unswapped scene image.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Face Swap Error: {} at line {} in {}", kind, line, file)]
pub struct FaceSwapError {
    /// The kind of error that occurred
    pub kind: FaceSwapErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FaceSwapError {
    /// Create a new face swap error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FaceSwapErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
