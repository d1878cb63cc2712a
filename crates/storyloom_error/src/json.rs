//! Malformed template documents and service payloads.

/// A template or service body that could not be (de)serialized.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Malformed JSON: {} (at {}:{})", message, file, line)]
pub struct JsonError {
    /// Parser message, usually prefixed with the document it came from
    pub message: String,
    /// Line of the call site
    pub line: u32,
    /// File of the call site
    pub file: &'static str,
}

impl JsonError {
    /// Record a parse failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::JsonError;
    ///
    /// let parsed = serde_json::from_str::<serde_json::Value>("{\"pages\": [");
    /// let err = JsonError::new(format!(
    ///     "Invalid template hair.json: {}",
    ///     parsed.unwrap_err()
    /// ));
    /// assert!(err.message.starts_with("Invalid template hair.json"));
    /// assert!(err.to_string().contains("Malformed JSON"));
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
