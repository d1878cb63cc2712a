//! Invalid or unreadable `storyloom.toml` settings.

/// A configuration layer that failed to load or a value that failed validation.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Invalid configuration: {} (at {}:{})", message, file, line)]
pub struct ConfigError {
    /// Offending setting and why it was rejected
    pub message: String,
    /// Line of the call site
    pub line: u32,
    /// File of the call site
    pub file: &'static str,
}

impl ConfigError {
    /// Record a configuration problem at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::{ConfigError, StoryloomError};
    ///
    /// let err: StoryloomError =
    ///     ConfigError::new("asset_base_url 'books' is not a valid URL").into();
    /// assert!(err.to_string().contains("Invalid configuration: asset_base_url"));
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
