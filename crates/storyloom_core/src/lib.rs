//! Core data types for the Storyloom book generation pipeline.
//!
//! This crate provides the data model shared by the clients, the orchestrator
//! and the callers: story templates, personalization input, generated pages,
//! progress snapshots and the request types sent to external services.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod mode;
mod page;
mod personalization;
mod progress;
mod request;
mod story;
mod template;

pub use mode::{GenerationMode, SessionStatus, Stage};
pub use page::{GeneratedPage, ResolutionPath};
pub use personalization::{Gender, PersonalizationInput, PersonalizationInputBuilder};
pub use progress::ProgressUpdate;
pub use request::{
    BookId, FaceSwapRequest, PersistRequest, StoryRequest, StoryResponse, SynthesisRequest,
    SynthesisRequestBuilder,
};
pub use story::{Story, StoryPage};
pub use template::{PageSpec, StoryTemplate, TemplateDocument};
