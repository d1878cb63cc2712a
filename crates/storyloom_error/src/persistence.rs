//! Persistence error types.

/// Kinds of persistence errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Storage backend could not be reached
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
    /// Storage backend rejected the book
    #[display("Book rejected: {}", _0)]
    Rejected(String),
    /// Response did not carry a book id
    #[display("Malformed persistence response: {}", _0)]
    MalformedResponse(String),
}

/// Persistence error with location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::Unavailable("db down".to_string()));
/// assert!(format!("{}", err).contains("db down"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
