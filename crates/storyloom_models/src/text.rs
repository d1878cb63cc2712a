//! Text generation service adapter.

use crate::endpoint::{ServiceEndpoint, ServiceFailure, post_json};
use async_trait::async_trait;
use reqwest::Client;
use storyloom_core::{Story, StoryRequest, StoryResponse};
use storyloom_error::{StoryGenerationError, StoryGenerationErrorKind, StoryloomResult};
use storyloom_interface::TextGenerator;
use tracing::{debug, instrument};

/// Client for the narrative generation service.
///
/// Posts `{childName, childAge, gender, theme}` and expects
/// `{story: {title, synopsis, pages: [...]}}` back.
#[derive(Debug, Clone)]
pub struct StoryTextClient {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl StoryTextClient {
    /// Creates a new text generation client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(url = %endpoint.url()))]
    pub fn new(endpoint: ServiceEndpoint) -> StoryloomResult<Self> {
        let client = endpoint.http_client()?;
        debug!("Created story text client");
        Ok(Self { client, endpoint })
    }

    fn convert_failure(failure: ServiceFailure) -> StoryGenerationError {
        let kind = match failure {
            ServiceFailure::Timeout(msg) => StoryGenerationErrorKind::Timeout(msg),
            ServiceFailure::Transport(msg) => StoryGenerationErrorKind::Upstream(msg),
            ServiceFailure::Status { status_code, body } => StoryGenerationErrorKind::HttpStatus {
                status_code,
                message: body,
            },
            ServiceFailure::Decode(msg) => StoryGenerationErrorKind::MalformedResponse(msg),
        };
        StoryGenerationError::new(kind)
    }
}

/// Decode a story envelope and reject structurally invalid stories.
pub(crate) fn parse_story(value: serde_json::Value) -> Result<Story, StoryGenerationError> {
    let envelope: StoryResponse = serde_json::from_value(value).map_err(|e| {
        StoryGenerationError::new(StoryGenerationErrorKind::MalformedResponse(e.to_string()))
    })?;

    let mut story = envelope
        .story
        .ok_or_else(|| StoryGenerationError::new(StoryGenerationErrorKind::MissingStory))?;

    if story.pages().is_empty() {
        return Err(StoryGenerationError::new(StoryGenerationErrorKind::EmptyPages));
    }

    story.sort_pages();
    Ok(story)
}

#[async_trait]
impl TextGenerator for StoryTextClient {
    #[instrument(skip(self, request), fields(theme = %request.theme, child_age = request.child_age))]
    async fn generate(&self, request: &StoryRequest) -> Result<Story, StoryGenerationError> {
        let value = post_json(&self.client, &self.endpoint, request)
            .await
            .map_err(Self::convert_failure)?;
        let story = parse_story(value)?;
        debug!(title = %story.title(), pages = story.pages().len(), "Story generated");
        Ok(story)
    }

    fn provider_name(&self) -> &'static str {
        "story-text"
    }
}
