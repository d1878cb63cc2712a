//! Shared HTTP plumbing for the service adapters.

use derive_getters::Getters;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use storyloom_error::{HttpError, StoryloomResult};
use tracing::{debug, error};

/// Location and credentials of one external service.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ServiceEndpoint {
    /// Full URL requests are posted to
    url: String,
    /// Bearer token, if the service requires one
    #[builder(default)]
    api_key: Option<String>,
    /// Per-request timeout
    #[builder(default = "Duration::from_secs(120)")]
    timeout: Duration,
}

impl ServiceEndpoint {
    /// Creates a new builder for `ServiceEndpoint`.
    pub fn builder() -> ServiceEndpointBuilder {
        ServiceEndpointBuilder::default()
    }

    /// Build an HTTP client honouring this endpoint's timeout.
    pub(crate) fn http_client(&self) -> StoryloomResult<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)).into())
    }
}

/// Why a service call produced no usable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFailure {
    /// Request exceeded its timeout
    Timeout(String),
    /// Connection or transport failure
    Transport(String),
    /// Non-success HTTP status
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },
    /// Body was not valid JSON
    Decode(String),
}

/// POST a JSON body and decode the JSON reply.
pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    endpoint: &ServiceEndpoint,
    body: &B,
) -> Result<serde_json::Value, ServiceFailure> {
    let mut request = client.post(endpoint.url()).json(body);
    if let Some(key) = endpoint.api_key() {
        request = request.header("Authorization", format!("Bearer {}", key));
    }

    debug!(url = %endpoint.url(), "Sending service request");

    let response = request.send().await.map_err(|e| {
        error!(error = ?e, url = %endpoint.url(), "HTTP request failed");
        if e.is_timeout() {
            ServiceFailure::Timeout(format!("Request to {} timed out", endpoint.url()))
        } else {
            ServiceFailure::Transport(format!("Request failed: {}", e))
        }
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
        if e.is_timeout() {
            ServiceFailure::Timeout(format!("Reading response from {} timed out", endpoint.url()))
        } else {
            ServiceFailure::Transport(format!("Failed to read response: {}", e))
        }
    })?;

    if !status.is_success() {
        error!(status = %status, body = %text, "Service returned an error status");
        return Err(ServiceFailure::Status {
            status_code: status.as_u16(),
            body: text,
        });
    }

    debug!(response_len = text.len(), "Received service response");

    serde_json::from_str(&text).map_err(|e| {
        error!(error = ?e, "Failed to parse JSON");
        ServiceFailure::Decode(format!("Failed to parse JSON: {}", e))
    })
}
