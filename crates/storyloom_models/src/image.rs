//! Text-to-image service adapter.

use crate::endpoint::{ServiceEndpoint, ServiceFailure, post_json};
use crate::normalize::extract_image_url;
use async_trait::async_trait;
use reqwest::Client;
use storyloom_core::SynthesisRequest;
use storyloom_error::{ImageGenerationError, ImageGenerationErrorKind, StoryloomResult};
use storyloom_interface::ImageSynthesizer;
use tracing::{debug, instrument, warn};

/// Client for the scene image synthesis service.
#[derive(Debug, Clone)]
pub struct SceneImageClient {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl SceneImageClient {
    /// Creates a new image synthesis client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(url = %endpoint.url()))]
    pub fn new(endpoint: ServiceEndpoint) -> StoryloomResult<Self> {
        let client = endpoint.http_client()?;
        debug!("Created scene image client");
        Ok(Self { client, endpoint })
    }

    fn convert_failure(failure: ServiceFailure) -> ImageGenerationError {
        let kind = match failure {
            ServiceFailure::Timeout(msg) | ServiceFailure::Transport(msg) => {
                ImageGenerationErrorKind::Request(msg)
            }
            ServiceFailure::Status { status_code, body } => ImageGenerationErrorKind::HttpStatus {
                status_code,
                message: body,
            },
            ServiceFailure::Decode(msg) => ImageGenerationErrorKind::MalformedResponse(msg),
        };
        ImageGenerationError::new(kind)
    }
}

#[async_trait]
impl ImageSynthesizer for SceneImageClient {
    #[instrument(skip(self, request), fields(prompt_len = request.prompt().len(), image_size = %request.image_size()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, ImageGenerationError> {
        let value = post_json(&self.client, &self.endpoint, request)
            .await
            .map_err(Self::convert_failure)?;

        match extract_image_url(&value) {
            Some(url) => {
                debug!(url = %url, "Scene image synthesized");
                Ok(url)
            }
            None => {
                warn!("Image service response contained no image");
                Err(ImageGenerationError::new(ImageGenerationErrorKind::NoImage))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "scene-image"
    }
}
