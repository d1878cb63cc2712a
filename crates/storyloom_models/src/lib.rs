//! HTTP adapters for the external services used by Storyloom.
//!
//! Each adapter is a thin, stateless request/response client implementing
//! one of the `storyloom_interface` traits. None of them retries internally.
//!
//! # Example
//!
//! ```no_run
//! use storyloom_models::{SceneImageClient, ServiceEndpoint};
//! use storyloom_interface::ImageSynthesizer;
//! use storyloom_core::SynthesisRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = ServiceEndpoint::builder()
//!     .url("https://images.example.com/v1/generate")
//!     .api_key(Some("secret".to_string()))
//!     .build()?;
//! let client = SceneImageClient::new(endpoint)?;
//! let request = SynthesisRequest::builder().prompt("a sunny beach").build()?;
//! let url = client.synthesize(&request).await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod endpoint;
mod face_swap;
mod image;
mod normalize;
mod persistence;
mod text;

pub use endpoint::{ServiceEndpoint, ServiceEndpointBuilder, ServiceFailure};
pub use face_swap::FaceSwapClient;
pub use image::SceneImageClient;
pub use normalize::{extract_book_id, extract_image_url};
pub use persistence::RestBookRepository;
pub use text::StoryTextClient;
