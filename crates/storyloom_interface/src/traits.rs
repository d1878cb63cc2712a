//! Trait definitions for the external services and the progress channel.

use async_trait::async_trait;
use storyloom_core::{
    BookId, FaceSwapRequest, PersistRequest, ProgressUpdate, Story, StoryRequest,
    SynthesisRequest,
};
use storyloom_error::{FaceSwapError, ImageGenerationError, PersistenceError, StoryGenerationError};

/// Produces the narrative text of a book.
///
/// Implementations do not retry; retry policy belongs to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a story for the given child and theme.
    ///
    /// # Errors
    ///
    /// Fails when the upstream call errors, times out, or returns a payload
    /// without a non-empty page list.
    async fn generate(&self, request: &StoryRequest) -> Result<Story, StoryGenerationError>;

    /// Provider name used in logs.
    fn provider_name(&self) -> &'static str;
}

/// Renders one scene image from a text prompt.
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    /// Synthesize an image and return its URL.
    ///
    /// # Errors
    ///
    /// Fails when the call errors or the response carries no image.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, ImageGenerationError>;

    /// Provider name used in logs.
    fn provider_name(&self) -> &'static str;
}

/// Overlays the child's face onto a target image.
#[async_trait]
pub trait FaceSwapper: Send + Sync {
    /// Swap the face and return the resulting URL.
    ///
    /// `Ok(None)` means the service answered without an image; callers fall
    /// back to the target image.
    async fn swap(&self, request: &FaceSwapRequest) -> Result<Option<String>, FaceSwapError>;

    /// Provider name used in logs.
    fn provider_name(&self) -> &'static str;
}

/// Long-lived storage for finished books.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Persist a finished book and return its id.
    async fn persist(&self, request: &PersistRequest) -> Result<BookId, PersistenceError>;
}

/// Receives progress snapshots as the pipeline advances.
///
/// Snapshots are owned copies; sinks never see live session state.
pub trait ProgressSink: Send + Sync {
    /// Deliver one snapshot. Must not block.
    fn report(&self, update: ProgressUpdate);
}
