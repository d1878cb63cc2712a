//! Wiring configured HTTP adapters into a stage controller.

use std::time::Duration;
use storyloom_error::{BuilderError, StoryloomResult};
use storyloom_interface::BookRepository;
use storyloom_models::{
    FaceSwapClient, RestBookRepository, SceneImageClient, ServiceEndpoint, StoryTextClient,
};
use storyloom_pipeline::{ServicesConfig, StageController, StoryloomConfig};
use tracing::{debug, instrument};

/// Endpoint for one service URL with the shared timeout and API key.
///
/// # Errors
///
/// Returns a [`BuilderError`] if the endpoint cannot be built.
pub fn endpoint_for(
    url: &str,
    api_key: Option<String>,
    timeout_secs: u64,
) -> StoryloomResult<ServiceEndpoint> {
    let endpoint = ServiceEndpoint::builder()
        .url(url)
        .api_key(api_key)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BuilderError::from(e.to_string()))?;
    Ok(endpoint)
}

/// REST repository for `persistence_url`, or `None` when it is unset.
///
/// # Errors
///
/// Returns an error if the endpoint or HTTP client cannot be built.
pub fn repository_for(
    services: &ServicesConfig,
    api_key: Option<String>,
) -> StoryloomResult<Option<Box<dyn BookRepository>>> {
    match services.persistence_url() {
        Some(url) => {
            debug!(url = %url, "Persisting books through REST repository");
            let endpoint = endpoint_for(url, api_key, *services.timeout_secs())?;
            Ok(Some(Box::new(RestBookRepository::new(endpoint)?)))
        }
        None => {
            debug!("No persistence_url configured, books will not be saved");
            Ok(None)
        }
    }
}

/// Build a controller talking to the services named in `config`.
///
/// Books are persisted through the REST repository when `persistence_url`
/// is configured. Without it no repository is installed and sessions report
/// no book id.
///
/// # Errors
///
/// Returns an error if an endpoint or HTTP client cannot be built, or the
/// pipeline configuration is invalid.
#[instrument(skip_all)]
pub fn controller_from_config(
    config: &StoryloomConfig,
    api_key: Option<String>,
) -> StoryloomResult<StageController> {
    let services = config.services();
    let timeout = *services.timeout_secs();
    let endpoint = |url: &str| endpoint_for(url, api_key.clone(), timeout);

    let text = StoryTextClient::new(endpoint(services.text_url())?)?;
    let images = SceneImageClient::new(endpoint(services.image_url())?)?;
    let face_swap = FaceSwapClient::new(endpoint(services.face_swap_url())?)?;

    let controller = StageController::new(
        Box::new(text),
        Box::new(images),
        Box::new(face_swap),
        config.pipeline().clone(),
    )?;
    Ok(match repository_for(services, api_key)? {
        Some(repository) => controller.with_repository(repository),
        None => controller,
    })
}
