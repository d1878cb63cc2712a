//! Storyloom - personalized children's book generation
//!
//! Storyloom turns a story template and a child's name, age, gender and
//! optional photo into an illustrated book. A single text generation call
//! writes the story; the cover and every page are then illustrated through
//! cached scene images, image synthesis and face swap, under a cost policy
//! that only illustrates the first pages of an unpurchased preview.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyloom::{GenerationMode, StoryloomConfig, controller_from_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryloomConfig::load(None)?;
//!     let controller = controller_from_config(&config, std::env::var("STORYLOOM_API_KEY").ok())?;
//!
//!     let template = storyloom::StoryTemplate::from_json(&std::fs::read_to_string("hair.json")?)?;
//!     let child = storyloom::PersonalizationInput::builder()
//!         .child_name("Fatou")
//!         .child_age(5u32)
//!         .gender(storyloom::Gender::Girl)
//!         .build()?;
//!
//!     let result = controller.run(&template, &child, GenerationMode::Preview).await?;
//!     println!("{:?}", result.session().cover_image_url());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - export tracing spans through OpenTelemetry
//! - `api` - enable tests that call the real services
//!
//! # Architecture
//!
//! - `storyloom_error` - error types
//! - `storyloom_core` - templates, stories, pages, progress snapshots
//! - `storyloom_interface` - service and progress traits
//! - `storyloom_models` - HTTP adapters for the external services
//! - `storyloom_pipeline` - the stage controller and its policies
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod observability;

pub use assembly::{controller_from_config, endpoint_for, repository_for};
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

pub use storyloom_core::*;
pub use storyloom_error::*;
pub use storyloom_interface::*;
pub use storyloom_models::*;
pub use storyloom_pipeline::*;
