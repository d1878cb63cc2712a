//! Request and response types exchanged with external services.

use crate::{Gender, GeneratedPage, PersonalizationInput, Story};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Request sent to the text generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    /// Child's first name
    pub child_name: String,
    /// Child's age in years
    pub child_age: u32,
    /// Child's gender
    pub gender: Gender,
    /// Theme identifier or free-text theme
    pub theme: String,
}

impl StoryRequest {
    /// Build a request from personalization input and a theme.
    pub fn new(personalization: &PersonalizationInput, theme: impl Into<String>) -> Self {
        Self {
            child_name: personalization.child_name().clone(),
            child_age: *personalization.child_age(),
            gender: *personalization.gender(),
            theme: theme.into(),
        }
    }
}

/// Response envelope of the text generation service.
///
/// `story` is optional so that `{"story": null}` decodes and can be rejected
/// with a precise error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// Generated story
    #[serde(default)]
    pub story: Option<Story>,
}

/// Request sent to the text-to-image service.
///
/// # Examples
///
/// ```
/// use storyloom_core::SynthesisRequest;
///
/// let request = SynthesisRequest::builder()
///     .prompt("a girl reading under a baobab tree")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.image_size(), "square_hd");
/// assert_eq!(*request.steps(), 28);
/// assert!(*request.safety_checker());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    /// Full text prompt
    prompt: String,
    /// Named output size understood by the service
    #[builder(default = "\"square_hd\".to_string()")]
    image_size: String,
    /// Inference steps
    #[builder(default = "28")]
    steps: u32,
    /// Classifier-free guidance scale
    #[builder(default = "3.5")]
    guidance_scale: f32,
    /// Whether the service's safety checker is enabled
    #[builder(default = "true")]
    safety_checker: bool,
}

impl SynthesisRequest {
    /// Creates a new builder for `SynthesisRequest`.
    pub fn builder() -> SynthesisRequestBuilder {
        SynthesisRequestBuilder::default()
    }
}

/// Request sent to the face swap service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceSwapRequest {
    /// Target scene image whose face is replaced
    pub base_image_url: String,
    /// Source photo providing the face
    pub swap_image_url: String,
}

impl FaceSwapRequest {
    /// Create a face swap request.
    pub fn new(base_image_url: impl Into<String>, swap_image_url: impl Into<String>) -> Self {
        Self {
            base_image_url: base_image_url.into(),
            swap_image_url: swap_image_url.into(),
        }
    }
}

/// Identifier assigned to a persisted book.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request sent to the persistence service once a book is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistRequest {
    /// Book title
    pub title: String,
    /// Personalization the book was generated for
    pub personalization: PersonalizationInput,
    /// Pages with their final images
    pub pages: Vec<GeneratedPage>,
    /// Final cover image
    pub cover_url: Option<String>,
    /// Template the book was generated from
    pub template_id: String,
    /// Authenticated owner, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}
