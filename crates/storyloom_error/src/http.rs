//! Transport failures talking to the story, image, face swap and book services.

/// A request that never produced a usable HTTP response.
///
/// Covers client construction, connection and body read failures. Non-2xx
/// statuses are reported by the service-specific error kinds instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Service transport error: {} (at {}:{})", message, file, line)]
pub struct HttpError {
    /// What went wrong on the wire
    pub message: String,
    /// Line of the call site
    pub line: u32,
    /// File of the call site
    pub file: &'static str,
}

impl HttpError {
    /// Record a transport failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::HttpError;
    ///
    /// let err = HttpError::new("story service unreachable: connection refused");
    /// assert!(err.to_string().starts_with("Service transport error: story service"));
    /// assert!(err.file.ends_with(".rs"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}
