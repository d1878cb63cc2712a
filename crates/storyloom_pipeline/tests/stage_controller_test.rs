//! End-to-end tests for the stage controller against recording mocks.

mod test_utils;

use storyloom_core::{
    Gender, GenerationMode, PageSpec, PersonalizationInput, ResolutionPath, SessionStatus, Stage,
    Story, StoryPage, StoryTemplate, TemplateDocument,
};
use storyloom_error::{PipelineErrorKind, StoryGenerationErrorKind, StoryloomErrorKind};
use storyloom_pipeline::{
    CoverPriority, PipelineConfig, SkippedPlaceholder, StageController, ThemeSource,
};
use test_utils::*;
use tokio_util::sync::CancellationToken;

struct Harness {
    text: MockTextGenerator,
    images: MockImageSynthesizer,
    face_swap: MockFaceSwapper,
    progress: RecordingProgress,
}

impl Harness {
    fn new(text: MockTextGenerator) -> Self {
        Self {
            text,
            images: MockImageSynthesizer::new(),
            face_swap: MockFaceSwapper::new(SwapBehavior::Swap),
            progress: RecordingProgress::new(),
        }
    }

    fn with_images(mut self, images: MockImageSynthesizer) -> Self {
        self.images = images;
        self
    }

    fn with_swap(mut self, behavior: SwapBehavior) -> Self {
        self.face_swap = MockFaceSwapper::new(behavior);
        self
    }

    fn controller(&self, config: PipelineConfig) -> StageController {
        StageController::new(
            Box::new(self.text.clone()),
            Box::new(self.images.clone()),
            Box::new(self.face_swap.clone()),
            config,
        )
        .expect("valid config")
        .with_progress(Box::new(self.progress.clone()))
    }
}

#[tokio::test]
async fn test_full_book_without_photo() {
    let harness = Harness::new(MockTextGenerator::new_story(story(10)));
    let controller = harness.controller(config());

    let result = controller
        .run(&hair_template(10), &fatou(), GenerationMode::Full)
        .await
        .expect("session succeeds");
    let session = result.session();

    assert_eq!(*session.status(), SessionStatus::Complete);
    assert_eq!(session.cover_image_url().as_deref(), Some(ABSOLUTE_COVER));
    assert_eq!(session.pages().len(), 10);
    for (index, page) in session.pages().iter().enumerate() {
        assert_eq!(*page.page_number(), index as u32 + 1);
        assert_eq!(page.text(), &format!("Page {} text", index + 1));
        assert_eq!(*page.resolution(), Some(ResolutionPath::Synthesized));
        assert!(page.image_url().is_some());
    }

    // The template cover is used as-is, so only the pages hit the image service.
    assert_eq!(harness.images.call_count(), 10);
    assert!(harness.face_swap.calls().is_empty());
    assert!(result.persistence_warning().is_none());
    assert!(session.persisted_book_id().is_none());

    let requests = harness.text.calls();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].child_name, "Fatou");
    assert_eq!(requests[0].theme, "Les Cheveux");
}

#[tokio::test]
async fn test_preview_with_photo_skips_pages_beyond_threshold() {
    let harness = Harness::new(MockTextGenerator::new_story(story(10)));
    let controller = harness.controller(config());

    let result = controller
        .run(&hair_template(10), &kofi_with_photo(), GenerationMode::Preview)
        .await
        .expect("session succeeds");
    let session = result.session();
    let cover = format!("{}?swapped", ABSOLUTE_COVER);

    assert_eq!(*session.status(), SessionStatus::Complete);
    assert_eq!(session.cover_image_url().as_deref(), Some(cover.as_str()));

    for page in &session.pages()[..2] {
        assert_eq!(*page.resolution(), Some(ResolutionPath::SynthesizedSwapped));
        assert!(page.image_url().as_deref().unwrap().ends_with("?swapped"));
    }
    for page in &session.pages()[2..] {
        assert_eq!(*page.resolution(), Some(ResolutionPath::Skipped));
        assert_eq!(page.image_url().as_deref(), Some(cover.as_str()));
    }

    assert_eq!(harness.images.call_count(), 2);
    // Cover plus the two billable pages.
    let swaps = harness.face_swap.calls();
    assert_eq!(swaps.len(), 3);
    assert!(swaps.iter().all(|s| s.swap_image_url == "https://photos.test/kofi.jpg"));
    assert_eq!(swaps[0].base_image_url, ABSOLUTE_COVER);
}

#[tokio::test]
async fn test_story_timeout_is_reported_verbatim() {
    let message = "Request timed out after 120s";
    let harness = Harness::new(MockTextGenerator::new_error(
        StoryGenerationErrorKind::Timeout(message.to_string()),
    ));
    let controller = harness.controller(config());

    let err = controller
        .run(&hair_template(10), &fatou(), GenerationMode::Full)
        .await
        .unwrap_err();

    let story_error = err.as_story_generation().expect("story generation error");
    assert_eq!(story_error.message(), message);

    let last = harness.progress.updates().pop().expect("progress emitted");
    assert_eq!(*last.status(), SessionStatus::Failed);
    assert_eq!(*last.stage(), Stage::Writing);
    assert_eq!(last.message(), message);

    assert_eq!(harness.images.call_count(), 0);
    assert!(harness.face_swap.calls().is_empty());
}

#[tokio::test]
async fn test_missing_story_fails_without_image_calls() {
    let harness = Harness::new(MockTextGenerator::new_error(
        StoryGenerationErrorKind::MissingStory,
    ));
    let controller = harness.controller(config());

    let err = controller
        .run(&hair_template(4), &kofi_with_photo(), GenerationMode::Full)
        .await
        .unwrap_err();

    assert!(err.as_story_generation().is_some());
    assert_eq!(harness.images.call_count(), 0);
    assert!(harness.face_swap.calls().is_empty());
}

#[tokio::test]
async fn test_page_count_mismatch_is_fatal() {
    let harness = Harness::new(MockTextGenerator::new_story(story(3)));
    let controller = harness.controller(config());

    let err = controller
        .run(&hair_template(5), &fatou(), GenerationMode::Full)
        .await
        .unwrap_err();

    assert_eq!(
        err.as_story_generation().map(|e| e.kind.clone()),
        Some(StoryGenerationErrorKind::PageCountMismatch {
            expected: 5,
            actual: 3
        })
    );
    assert_eq!(harness.images.call_count(), 0);
}

#[tokio::test]
async fn test_base_image_is_reused_and_absolutized() {
    let template = template_with(3, Some(TEMPLATE_COVER.to_string()), |n| {
        (n == 1).then(|| "/scenes/p1.png".to_string())
    });
    let harness = Harness::new(MockTextGenerator::new_story(story(3)));
    let controller = harness.controller(config());

    let result = controller
        .run(&template, &kofi_with_photo(), GenerationMode::Full)
        .await
        .expect("session succeeds");
    let first = &result.session().pages()[0];

    assert_eq!(*first.resolution(), Some(ResolutionPath::CachedSwapped));
    assert_eq!(
        first.image_url().as_deref(),
        Some("https://books.test/scenes/p1.png?swapped")
    );
    // Pages 2 and 3 only.
    assert_eq!(harness.images.call_count(), 2);
    assert!(harness
        .face_swap
        .calls()
        .iter()
        .any(|s| s.base_image_url == "https://books.test/scenes/p1.png"));
}

#[tokio::test]
async fn test_cached_page_without_photo() {
    let template = template_with(3, Some(TEMPLATE_COVER.to_string()), |n| {
        (n == 3).then(|| "/scenes/p3.png".to_string())
    });
    let harness = Harness::new(MockTextGenerator::new_story(story(3)));
    let controller = harness.controller(config());

    let result = controller
        .run(&template, &fatou(), GenerationMode::Full)
        .await
        .expect("session succeeds");
    let third = &result.session().pages()[2];

    assert_eq!(*third.page_number(), 3);
    assert_eq!(*third.resolution(), Some(ResolutionPath::Cached));
    assert_eq!(
        third.image_url().as_deref(),
        Some("https://books.test/scenes/p3.png")
    );
    // Pages 1 and 2 only.
    assert_eq!(harness.images.call_count(), 2);
    assert!(harness.face_swap.calls().is_empty());
}

#[tokio::test]
async fn test_duplicate_page_numbers_are_fatal() {
    let pages = vec![
        StoryPage::new(1, "first", None),
        StoryPage::new(1, "second", None),
        StoryPage::new(2, "third", None),
    ];
    let harness = Harness::new(MockTextGenerator::new_story(Story::new(
        "Fatou's Hair",
        "A story about hair",
        pages,
    )));
    let controller = harness.controller(config());

    let err = controller
        .run(&hair_template(3), &fatou(), GenerationMode::Full)
        .await
        .unwrap_err();

    assert_eq!(
        err.as_story_generation().map(|e| e.kind.clone()),
        Some(StoryGenerationErrorKind::PageNumbering {
            position: 1,
            found: 1
        })
    );
    assert_eq!(harness.images.call_count(), 0);
}

#[tokio::test]
async fn test_face_swap_failure_keeps_scene() {
    let harness =
        Harness::new(MockTextGenerator::new_story(story(2))).with_swap(SwapBehavior::Fail);
    let controller = harness.controller(config());

    let result = controller
        .run(&hair_template(2), &kofi_with_photo(), GenerationMode::Full)
        .await
        .expect("swap failures are not fatal");
    let session = result.session();

    assert_eq!(*session.status(), SessionStatus::Complete);
    assert_eq!(session.cover_image_url().as_deref(), Some(ABSOLUTE_COVER));
    for page in session.pages() {
        assert_eq!(*page.resolution(), Some(ResolutionPath::Synthesized));
        assert!(page.image_url().as_deref().unwrap().starts_with("https://img.test/scene-"));
    }
}

#[tokio::test]
async fn test_empty_face_swap_keeps_scene() {
    let harness =
        Harness::new(MockTextGenerator::new_story(story(1))).with_swap(SwapBehavior::Empty);
    let controller = harness.controller(config());

    let result = controller
        .run(&hair_template(1), &kofi_with_photo(), GenerationMode::Full)
        .await
        .unwrap();

    assert_eq!(
        *result.session().pages()[0].resolution(),
        Some(ResolutionPath::Synthesized)
    );
    assert_eq!(harness.face_swap.calls().len(), 2);
}

#[tokio::test]
async fn test_synthesis_failure_marks_page_failed_and_continues() {
    let harness = Harness::new(MockTextGenerator::new_story(story(4)))
        .with_images(MockImageSynthesizer::failing_on(&["scene 3"]));
    let controller = harness.controller(config());

    let result = controller
        .run(&hair_template(4), &fatou(), GenerationMode::Full)
        .await
        .expect("page failures are not fatal");
    let pages = result.session().pages();

    assert_eq!(*result.session().status(), SessionStatus::Complete);
    assert_eq!(*pages[2].resolution(), Some(ResolutionPath::Failed));
    assert!(pages[2].image_url().is_none());
    assert_eq!(*pages[3].resolution(), Some(ResolutionPath::Synthesized));
    assert_eq!(harness.images.call_count(), 4);
}

#[tokio::test]
async fn test_skipped_placeholder_none() {
    let harness = Harness::new(MockTextGenerator::new_story(story(3)));
    let controller = harness.controller(
        config()
            .with_preview_threshold(1)
            .with_skipped_placeholder(SkippedPlaceholder::None),
    );

    let result = controller
        .run(&hair_template(3), &fatou(), GenerationMode::Preview)
        .await
        .unwrap();
    let pages = result.session().pages();

    assert!(pages[0].image_url().is_some());
    for page in &pages[1..] {
        assert_eq!(*page.resolution(), Some(ResolutionPath::Skipped));
        assert!(page.image_url().is_none());
    }
    assert_eq!(harness.images.call_count(), 1);
}

#[tokio::test]
async fn test_synthesized_cover_priority() {
    let harness = Harness::new(MockTextGenerator::new_story(story(2)));
    let controller =
        harness.controller(config().with_cover_priority(CoverPriority::Synthesized));

    let result = controller
        .run(&hair_template(2), &fatou(), GenerationMode::Full)
        .await
        .unwrap();

    assert_eq!(
        result.session().cover_image_url().as_deref(),
        Some("https://img.test/cover.png")
    );
    let prompts = harness.images.prompts();
    assert!(prompts[0].contains("book cover"));
    assert!(prompts[0].contains("Les cheveux de Fatou"));
}

#[tokio::test]
async fn test_cover_falls_back_to_template_asset() {
    let harness = Harness::new(MockTextGenerator::new_story(story(2)))
        .with_images(MockImageSynthesizer::failing_on(&["book cover"]));
    let controller =
        harness.controller(config().with_cover_priority(CoverPriority::Synthesized));

    let result = controller
        .run(&hair_template(2), &fatou(), GenerationMode::Full)
        .await
        .unwrap();

    assert_eq!(
        result.session().cover_image_url().as_deref(),
        Some(ABSOLUTE_COVER)
    );
}

#[tokio::test]
async fn test_template_without_cover_synthesizes_one() {
    let template = template_with(2, None, |_| None);
    let harness = Harness::new(MockTextGenerator::new_story(story(2)));
    let controller = harness.controller(config());

    let result = controller
        .run(&template, &fatou(), GenerationMode::Full)
        .await
        .unwrap();

    assert_eq!(
        result.session().cover_image_url().as_deref(),
        Some("https://img.test/cover.png")
    );
    assert_eq!(harness.images.call_count(), 3);
}

#[tokio::test]
async fn test_edited_text_is_kept_and_prompts_scene() {
    // Blank template prompts let the page text drive synthesis.
    let template = StoryTemplate::new(
        "tpl-hair",
        "Les Cheveux",
        "",
        None,
        TemplateDocument::new(
            "Les cheveux magiques",
            "",
            vec![PageSpec::new(1, "one", "", None), PageSpec::new(2, "two", "", None)],
        ),
    );
    let harness = Harness::new(MockTextGenerator::new_story(story(2)));
    let controller = harness.controller(config());

    let mut draft = controller.write(&template, &fatou()).await.unwrap();
    draft
        .edit_page_text(2, "{name} dances under the baobab")
        .unwrap();
    assert!(draft.edit_page_text(3, "no such page").is_err());

    let session = controller
        .illustrate(draft, GenerationMode::Full)
        .await
        .unwrap();

    assert_eq!(session.pages()[1].text(), "{name} dances under the baobab");
    assert!(harness
        .images
        .prompts()
        .iter()
        .any(|p| p.contains("Fatou dances under the baobab")));
}

#[tokio::test]
async fn test_custom_theme_overrides_template() {
    let harness = Harness::new(MockTextGenerator::new_story(story(1)));
    let controller = harness
        .controller(config())
        .with_theme(ThemeSource::Custom("bedtime courage".to_string()));

    controller
        .run(&hair_template(1), &fatou(), GenerationMode::Full)
        .await
        .unwrap();

    assert_eq!(harness.text.calls()[0].theme, "bedtime courage");
}

#[tokio::test]
async fn test_invalid_personalization_makes_no_calls() {
    let harness = Harness::new(MockTextGenerator::new_story(story(1)));
    let controller = harness.controller(config());
    let nameless = PersonalizationInput::builder()
        .child_name("  ")
        .child_age(4u32)
        .gender(Gender::Girl)
        .build()
        .unwrap();

    let err = controller
        .run(&hair_template(1), &nameless, GenerationMode::Full)
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        StoryloomErrorKind::Pipeline(e) if matches!(e.kind, PipelineErrorKind::InvalidPersonalization(_))
    ));
    assert!(harness.text.calls().is_empty());
}

#[tokio::test]
async fn test_cancelled_before_illustrating() {
    let harness = Harness::new(MockTextGenerator::new_story(story(3)));
    let token = CancellationToken::new();
    let controller = harness
        .controller(config())
        .with_cancellation(token.clone());

    let draft = controller
        .write(&hair_template(3), &fatou())
        .await
        .unwrap();
    token.cancel();
    let err = controller
        .illustrate(draft, GenerationMode::Full)
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        StoryloomErrorKind::Pipeline(e) if matches!(e.kind, PipelineErrorKind::Cancelled(_))
    ));
    assert_eq!(harness.images.call_count(), 0);
}

#[tokio::test]
async fn test_concurrent_pages_stay_ordered() {
    let harness = Harness::new(MockTextGenerator::new_story(story(8)));
    let controller = harness.controller(config().with_illustration_concurrency(3));

    let result = controller
        .run(&hair_template(8), &kofi_with_photo(), GenerationMode::Full)
        .await
        .unwrap();

    let numbers: Vec<u32> = result
        .session()
        .pages()
        .iter()
        .map(|p| *p.page_number())
        .collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    assert_eq!(result.session().resolved_count(), 8);

    let page_messages: Vec<String> = harness
        .progress
        .messages()
        .into_iter()
        .filter(|m| m.starts_with("Illustrated page"))
        .collect();
    let expected: Vec<String> = (1..=8)
        .map(|n| format!("Illustrated page {} of 8", n))
        .collect();
    assert_eq!(page_messages, expected);
}

#[tokio::test]
async fn test_progress_is_monotonic_and_ends_complete() {
    let harness = Harness::new(MockTextGenerator::new_story(story(5)));
    let controller = harness.controller(config());

    controller
        .run(&hair_template(5), &fatou(), GenerationMode::Preview)
        .await
        .unwrap();

    let updates = harness.progress.updates();
    let percents: Vec<u8> = updates.iter().map(|u| u.percent()).collect();
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));

    let last = updates.last().unwrap();
    assert_eq!(*last.status(), SessionStatus::Complete);
    assert_eq!(last.percent(), 100);
    assert_eq!(*last.completed(), 5);

    for update in &updates {
        let numbers: Vec<u32> = update.pages().iter().map(|p| *p.page_number()).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }
}

#[tokio::test]
async fn test_persists_for_owner() {
    let harness = Harness::new(MockTextGenerator::new_story(story(2)));
    let repository = MockRepository::new();
    let controller = harness
        .controller(config())
        .with_repository(Box::new(repository.clone()));

    let result = controller
        .run_with_owner(&hair_template(2), &fatou(), GenerationMode::Full, Some("user-7"))
        .await
        .unwrap();

    assert_eq!(
        result.session().persisted_book_id().as_ref().map(|id| id.as_str()),
        Some("book-42")
    );
    let calls = repository.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].owner_id.as_deref(), Some("user-7"));
    assert_eq!(calls[0].template_id, "tpl-hair");
    assert_eq!(calls[0].title, "Les cheveux de Fatou");
    assert_eq!(calls[0].pages.len(), 2);
    assert!(harness
        .progress
        .updates()
        .iter()
        .any(|u| *u.stage() == Stage::Persisting));
}

#[tokio::test]
async fn test_anonymous_run_is_not_persisted() {
    let harness = Harness::new(MockTextGenerator::new_story(story(2)));
    let repository = MockRepository::new();
    let controller = harness
        .controller(config())
        .with_repository(Box::new(repository.clone()));

    let result = controller
        .run(&hair_template(2), &fatou(), GenerationMode::Full)
        .await
        .unwrap();

    assert!(repository.calls().is_empty());
    assert!(result.session().persisted_book_id().is_none());
}

#[tokio::test]
async fn test_persistence_failure_is_a_warning() {
    let harness = Harness::new(MockTextGenerator::new_story(story(2)));
    let controller = harness
        .controller(config())
        .with_repository(Box::new(MockRepository::failing()));

    let result = controller
        .run_with_owner(&hair_template(2), &fatou(), GenerationMode::Full, Some("user-7"))
        .await
        .expect("persistence failures are not fatal");

    assert_eq!(*result.session().status(), SessionStatus::Complete);
    assert!(result.session().persisted_book_id().is_none());
    let warning = result.persistence_warning().as_deref().unwrap();
    assert!(warning.contains("database offline"));
}
