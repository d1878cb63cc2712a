//! Trait definitions for the Storyloom pipeline.
//!
//! Every external collaborator of the orchestrator sits behind one of these
//! traits so that the stage controller can be driven by HTTP adapters in
//! production and by in-memory fakes in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{BookRepository, FaceSwapper, ImageSynthesizer, ProgressSink, TextGenerator};
