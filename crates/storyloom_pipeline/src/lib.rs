//! Generation orchestration for Storyloom personalized books.
//!
//! This crate turns a story template plus a child's personalization data into
//! an illustrated book. The [`StageController`] drives a two-stage pipeline:
//!
//! - **Writing**: one call to the text generation service; failure is fatal
//! - **Illustrating**: the cover, then every page in ascending order, each
//!   resolved through cost gate → cache → synthesis → face swap → fallback
//!
//! Per-page failures never abort a session. Progress snapshots are pushed to a
//! [`ProgressSink`](storyloom_interface::ProgressSink) after every step.
//!
//! # Example
//!
//! ```rust,ignore
//! use storyloom_pipeline::{PipelineConfig, ProgressReporter, StageController};
//! use storyloom_core::GenerationMode;
//!
//! let (reporter, mut updates) = ProgressReporter::channel();
//! let controller = StageController::new(text, images, face_swap, PipelineConfig::default())?
//!     .with_progress(Box::new(reporter));
//!
//! tokio::spawn(async move {
//!     while let Some(update) = updates.recv().await {
//!         println!("{}% {}", update.percent(), update.message());
//!     }
//! });
//!
//! let result = controller.run(&template, &personalization, GenerationMode::Preview).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod config;
mod controller;
mod in_memory_repository;
mod policy;
mod progress;
mod prompt;
mod session;

pub use assets::AssetResolver;
pub use config::{
    CoverPriority, PipelineConfig, ServicesConfig, SkippedPlaceholder, StoryloomConfig,
    SynthesisSettings,
};
pub use controller::{StageController, ThemeSource};
pub use in_memory_repository::InMemoryBookRepository;
pub use policy::CostPolicy;
pub use progress::{ProgressReporter, TracingProgress};
pub use prompt::ScenePromptBuilder;
pub use session::{BookDraft, GenerationSession, SessionResult};
