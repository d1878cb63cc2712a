//! Error types for the Storyloom pipeline.
//!
//! This crate provides the foundation error types used throughout the Storyloom workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Only [`StoryGenerationError`] is fatal to a generation session. Image,
//! face swap and persistence errors are page-local or post-completion and are
//! absorbed by the orchestrator.
//!
//! # Examples
//!
//! ```
//! use storyloom_error::{StoryloomResult, HttpError};
//!
//! fn fetch_story() -> StoryloomResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_story().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod face_swap;
mod http;
mod image;
mod json;
mod persistence;
mod pipeline;
mod story;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{StoryloomError, StoryloomErrorKind, StoryloomResult};
pub use face_swap::{FaceSwapError, FaceSwapErrorKind};
pub use http::HttpError;
pub use image::{ImageGenerationError, ImageGenerationErrorKind};
pub use json::JsonError;
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use story::{StoryGenerationError, StoryGenerationErrorKind};
