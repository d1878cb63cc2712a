//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, FaceSwapError, HttpError, ImageGenerationError, JsonError,
    PersistenceError, PipelineError, StoryGenerationError,
};

/// Union of every error raised in the workspace.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StoryloomError = http_err.into();
/// assert!(format!("{}", err).contains("Service transport error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryloomErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Narrative text generation failed (fatal to a session)
    #[from(StoryGenerationError)]
    StoryGeneration(StoryGenerationError),
    /// Scene image synthesis failed
    #[from(ImageGenerationError)]
    ImageGeneration(ImageGenerationError),
    /// Face swap failed
    #[from(FaceSwapError)]
    FaceSwap(FaceSwapError),
    /// Book persistence failed
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Stage controller error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Storyloom error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomResult, ConfigError};
///
/// fn might_fail() -> StoryloomResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyloom Error: {}", _0)]
pub struct StoryloomError(Box<StoryloomErrorKind>);

impl StoryloomError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryloomErrorKind {
        &self.0
    }

    /// The story generation failure carried by this error, if any.
    pub fn as_story_generation(&self) -> Option<&StoryGenerationError> {
        match self.kind() {
            StoryloomErrorKind::StoryGeneration(e) => Some(e),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to StoryloomErrorKind
impl<T> From<T> for StoryloomError
where
    T: Into<StoryloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyloom operations.
pub type StoryloomResult<T> = std::result::Result<T, StoryloomError>;
