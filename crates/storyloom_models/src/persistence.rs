//! REST adapter for book persistence.

use crate::endpoint::{ServiceEndpoint, ServiceFailure, post_json};
use crate::normalize::extract_book_id;
use async_trait::async_trait;
use reqwest::Client;
use storyloom_core::{BookId, PersistRequest};
use storyloom_error::{PersistenceError, PersistenceErrorKind, StoryloomResult};
use storyloom_interface::BookRepository;
use tracing::{debug, instrument};

/// Persists finished books through a REST endpoint returning `{bookId}`.
#[derive(Debug, Clone)]
pub struct RestBookRepository {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl RestBookRepository {
    /// Creates a new REST repository.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    pub fn new(endpoint: ServiceEndpoint) -> StoryloomResult<Self> {
        let client = endpoint.http_client()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl BookRepository for RestBookRepository {
    #[instrument(skip(self, request), fields(template_id = %request.template_id, pages = request.pages.len()))]
    async fn persist(&self, request: &PersistRequest) -> Result<BookId, PersistenceError> {
        let value = post_json(&self.client, &self.endpoint, request)
            .await
            .map_err(|failure| {
                let kind = match failure {
                    ServiceFailure::Timeout(msg) | ServiceFailure::Transport(msg) => {
                        PersistenceErrorKind::Unavailable(msg)
                    }
                    ServiceFailure::Status { status_code, body } => {
                        PersistenceErrorKind::Rejected(format!("HTTP {}: {}", status_code, body))
                    }
                    ServiceFailure::Decode(msg) => PersistenceErrorKind::MalformedResponse(msg),
                };
                PersistenceError::new(kind)
            })?;

        let id = extract_book_id(&value).ok_or_else(|| {
            PersistenceError::new(PersistenceErrorKind::MalformedResponse(
                "response carried no book id".to_string(),
            ))
        })?;
        debug!(book_id = %id, "Book persisted");
        Ok(BookId::from(id))
    }
}
