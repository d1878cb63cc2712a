//! Recording mocks for the external services.
//!
//! Every mock is cheap to clone; clones share the same call log so a test can
//! keep a handle after boxing the service into the controller.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storyloom_core::{
    BookId, FaceSwapRequest, PersistRequest, ProgressUpdate, Story, StoryRequest,
    SynthesisRequest,
};
use storyloom_error::{
    FaceSwapError, FaceSwapErrorKind, ImageGenerationError, ImageGenerationErrorKind,
    PersistenceError, PersistenceErrorKind, StoryGenerationError, StoryGenerationErrorKind,
};
use storyloom_interface::{BookRepository, FaceSwapper, ImageSynthesizer, ProgressSink, TextGenerator};

/// Text service returning a fixed story or error.
#[derive(Clone)]
pub struct MockTextGenerator {
    outcome: Result<Story, StoryGenerationErrorKind>,
    calls: Arc<Mutex<Vec<StoryRequest>>>,
}

impl MockTextGenerator {
    pub fn new_story(story: Story) -> Self {
        Self {
            outcome: Ok(story),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new_error(kind: StoryGenerationErrorKind) -> Self {
        Self {
            outcome: Err(kind),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<StoryRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &StoryRequest) -> Result<Story, StoryGenerationError> {
        self.calls.lock().unwrap().push(request.clone());
        self.outcome.clone().map_err(StoryGenerationError::new)
    }

    fn provider_name(&self) -> &'static str {
        "mock-text"
    }
}

/// Image service answering every prompt with a distinct URL.
///
/// Cover prompts resolve to `https://img.test/cover.png`; scene prompts to
/// `https://img.test/scene-N.png` where N is the call number. Prompts
/// containing a configured marker fail.
#[derive(Clone, Default)]
pub struct MockImageSynthesizer {
    fail_on: Vec<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(markers: &[&str]) -> Self {
        Self {
            fail_on: markers.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageSynthesizer for MockImageSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, ImageGenerationError> {
        let prompt = request.prompt().clone();
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.clone());
            prompts.len()
        };
        // Yield so concurrent pages genuinely interleave.
        tokio::task::yield_now().await;

        if self.fail_on.iter().any(|marker| prompt.contains(marker.as_str())) {
            return Err(ImageGenerationError::new(ImageGenerationErrorKind::Request(
                "synthesis backend unavailable".to_string(),
            )));
        }
        if prompt.contains("book cover") {
            Ok("https://img.test/cover.png".to_string())
        } else {
            Ok(format!("https://img.test/scene-{}.png", call))
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-image"
    }
}

/// How the face swap mock answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapBehavior {
    /// Return `<base>?swapped`
    Swap,
    /// Return no image
    Empty,
    /// Fail with an HTTP error
    Fail,
}

#[derive(Clone)]
pub struct MockFaceSwapper {
    behavior: SwapBehavior,
    calls: Arc<Mutex<Vec<FaceSwapRequest>>>,
}

impl MockFaceSwapper {
    pub fn new(behavior: SwapBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<FaceSwapRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FaceSwapper for MockFaceSwapper {
    async fn swap(&self, request: &FaceSwapRequest) -> Result<Option<String>, FaceSwapError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.behavior {
            SwapBehavior::Swap => Ok(Some(format!("{}?swapped", request.base_image_url))),
            SwapBehavior::Empty => Ok(None),
            SwapBehavior::Fail => Err(FaceSwapError::new(FaceSwapErrorKind::HttpStatus {
                status_code: 503,
                message: "face swap overloaded".to_string(),
            })),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-face-swap"
    }
}

#[derive(Clone)]
pub struct MockRepository {
    fail: bool,
    calls: Arc<Mutex<Vec<PersistRequest>>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<PersistRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookRepository for MockRepository {
    async fn persist(&self, request: &PersistRequest) -> Result<BookId, PersistenceError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.fail {
            Err(PersistenceError::new(PersistenceErrorKind::Unavailable(
                "database offline".to_string(),
            )))
        } else {
            Ok(BookId::from("book-42".to_string()))
        }
    }
}

/// Progress sink keeping every snapshot.
#[derive(Clone, Default)]
pub struct RecordingProgress {
    updates: Arc<Mutex<Vec<ProgressUpdate>>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.updates().iter().map(|u| u.message().clone()).collect()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, update: ProgressUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}
