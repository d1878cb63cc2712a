//! Face swap service adapter.

use crate::endpoint::{ServiceEndpoint, ServiceFailure, post_json};
use crate::normalize::extract_image_url;
use async_trait::async_trait;
use reqwest::Client;
use storyloom_core::FaceSwapRequest;
use storyloom_error::{FaceSwapError, FaceSwapErrorKind, StoryloomResult};
use storyloom_interface::FaceSwapper;
use tracing::{debug, instrument};

/// Client for the face swap service.
///
/// Posts `{baseImageUrl, swapImageUrl}`; an answer without an image is not an
/// error and yields `Ok(None)`.
#[derive(Debug, Clone)]
pub struct FaceSwapClient {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl FaceSwapClient {
    /// Creates a new face swap client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(url = %endpoint.url()))]
    pub fn new(endpoint: ServiceEndpoint) -> StoryloomResult<Self> {
        let client = endpoint.http_client()?;
        debug!("Created face swap client");
        Ok(Self { client, endpoint })
    }

    fn convert_failure(failure: ServiceFailure) -> FaceSwapError {
        let kind = match failure {
            ServiceFailure::Timeout(msg) | ServiceFailure::Transport(msg) => {
                FaceSwapErrorKind::Request(msg)
            }
            ServiceFailure::Status { status_code, body } => FaceSwapErrorKind::HttpStatus {
                status_code,
                message: body,
            },
            ServiceFailure::Decode(msg) => FaceSwapErrorKind::MalformedResponse(msg),
        };
        FaceSwapError::new(kind)
    }
}

#[async_trait]
impl FaceSwapper for FaceSwapClient {
    #[instrument(skip(self, request), fields(target = %request.base_image_url))]
    async fn swap(&self, request: &FaceSwapRequest) -> Result<Option<String>, FaceSwapError> {
        let value = post_json(&self.client, &self.endpoint, request)
            .await
            .map_err(Self::convert_failure)?;
        let url = extract_image_url(&value);
        debug!(swapped = url.is_some(), "Face swap finished");
        Ok(url)
    }

    fn provider_name(&self) -> &'static str {
        "face-swap"
    }
}
