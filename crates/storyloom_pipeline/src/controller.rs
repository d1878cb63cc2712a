//! The stage controller driving Writing, Illustrating and Persisting.

use crate::{
    AssetResolver, BookDraft, CostPolicy, CoverPriority, GenerationSession, PipelineConfig,
    ScenePromptBuilder, SessionResult, SkippedPlaceholder, TracingProgress,
};
use futures_util::{StreamExt, stream};
use storyloom_core::{
    FaceSwapRequest, GeneratedPage, GenerationMode, PageSpec, PersistRequest,
    PersonalizationInput, ResolutionPath, Stage, Story, StoryPage, StoryRequest, StoryTemplate,
    SynthesisRequest,
};
use storyloom_error::{
    BuilderError, PipelineError, PipelineErrorKind, StoryGenerationError,
    StoryGenerationErrorKind, StoryloomResult,
};
use storyloom_interface::{
    BookRepository, FaceSwapper, ImageSynthesizer, ProgressSink, TextGenerator,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Where the theme sent to the text service comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThemeSource {
    /// The template's own theme
    #[default]
    Template,
    /// A caller-supplied theme overriding the template's
    Custom(String),
}

/// Everything a page needs that is shared across the book.
struct PageContext<'a> {
    personalization: &'a PersonalizationInput,
    cover: Option<&'a str>,
    photo: Option<&'a str>,
    mode: GenerationMode,
}

/// Orchestrates one personalized book through its stages.
///
/// The controller owns the service clients and the policy objects, and a
/// session object per request. Writing failures are fatal; every other
/// external failure degrades to a fallback image or a failed page.
///
/// # Example
///
/// ```rust,ignore
/// let controller = StageController::new(text, images, face_swap, config)?
///     .with_repository(Box::new(InMemoryBookRepository::new()))
///     .with_theme(ThemeSource::Custom("bedtime".to_string()));
///
/// let mut draft = controller.write(&template, &child).await?;
/// draft.edit_page_text(1, "Once upon a time...")?;
/// let session = controller.illustrate(draft, GenerationMode::Full).await?;
/// ```
pub struct StageController {
    text: Box<dyn TextGenerator>,
    images: Box<dyn ImageSynthesizer>,
    face_swap: Box<dyn FaceSwapper>,
    repository: Option<Box<dyn BookRepository>>,
    progress: Box<dyn ProgressSink>,
    config: PipelineConfig,
    policy: CostPolicy,
    assets: AssetResolver,
    prompts: ScenePromptBuilder,
    theme: ThemeSource,
    cancellation: CancellationToken,
}

impl StageController {
    /// Create a controller from the three generation services.
    ///
    /// Progress goes to the log until [`with_progress`](Self::with_progress)
    /// installs another sink.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `asset_base_url` is not a valid URL.
    pub fn new(
        text: Box<dyn TextGenerator>,
        images: Box<dyn ImageSynthesizer>,
        face_swap: Box<dyn FaceSwapper>,
        config: PipelineConfig,
    ) -> StoryloomResult<Self> {
        let assets = AssetResolver::new(config.asset_base_url().as_deref())?;
        let policy = CostPolicy::new(*config.preview_threshold());
        let prompts = ScenePromptBuilder::new(
            config.subject_traits().clone(),
            config.style_modifiers().clone(),
        );
        Ok(Self {
            text,
            images,
            face_swap,
            repository: None,
            progress: Box::new(TracingProgress),
            config,
            policy,
            assets,
            prompts,
            theme: ThemeSource::default(),
            cancellation: CancellationToken::new(),
        })
    }

    /// Persist completed books to this repository.
    pub fn with_repository(mut self, repository: Box<dyn BookRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Send progress snapshots to this sink.
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Choose where the story theme comes from.
    pub fn with_theme(mut self, theme: ThemeSource) -> Self {
        self.theme = theme;
        self
    }

    /// Abort sessions when this token is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Token that cancels this controller's sessions.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Run the Writing stage.
    ///
    /// # Errors
    ///
    /// - [`PipelineErrorKind::InvalidPersonalization`] or
    ///   [`PipelineErrorKind::InvalidTemplate`] before any external call
    /// - a [`StoryGenerationError`] when the text service fails or its story
    ///   does not match the template; the failure message is also emitted as a
    ///   `Failed` progress snapshot
    /// - [`PipelineErrorKind::Cancelled`] if the session was cancelled
    #[instrument(
        skip_all,
        fields(template_id = %template.id(), child = %personalization.child_name())
    )]
    pub async fn write(
        &self,
        template: &StoryTemplate,
        personalization: &PersonalizationInput,
    ) -> StoryloomResult<BookDraft> {
        personalization
            .validate()
            .map_err(|m| PipelineError::new(PipelineErrorKind::InvalidPersonalization(m)))?;
        template
            .validate()
            .map_err(|m| PipelineError::new(PipelineErrorKind::InvalidTemplate(m)))?;

        let total = template.page_count();
        let mut session = GenerationSession::new();
        session.begin_writing();
        self.emit(
            &session,
            Stage::Writing,
            format!("Writing the story for {}", personalization.child_name()),
            total,
        );
        self.ensure_active(Stage::Writing)?;

        let request = StoryRequest::new(personalization, self.theme_for(template));
        debug!(
            provider = self.text.provider_name(),
            theme = %request.theme,
            "Requesting story"
        );

        let outcome = self
            .text
            .generate(&request)
            .await
            .and_then(|story| check_story(story, total));

        match outcome {
            Ok(story) => {
                info!(title = %story.title(), pages = story.pages().len(), "Story written");
                session.accept_story(story.clone());
                self.emit(&session, Stage::Writing, "Story written", total);
                Ok(BookDraft::new(
                    template.clone(),
                    personalization.clone(),
                    story,
                ))
            }
            Err(e) => {
                error!(error = %e, "Story generation failed");
                session.fail();
                self.emit(&session, Stage::Writing, e.message(), total);
                Err(e.into())
            }
        }
    }

    /// Run the Illustrating stage over a written draft.
    ///
    /// Resolves the cover first, then every page. Pages may be resolved
    /// concurrently up to `illustration_concurrency`, but they are recorded
    /// and reported in ascending page order.
    ///
    /// # Errors
    ///
    /// Only [`PipelineErrorKind::Cancelled`]; external failures degrade the
    /// affected image instead.
    #[instrument(skip_all, fields(template_id = %draft.template().id(), mode = %mode))]
    pub async fn illustrate(
        &self,
        draft: BookDraft,
        mode: GenerationMode,
    ) -> StoryloomResult<GenerationSession> {
        let (template, personalization, story) = draft.into_parts();
        let total = template.page_count();
        let mut session = GenerationSession::written(story.clone());
        session.begin_illustrating(mode);

        let billable = self.policy.billable_pages(total, mode);
        self.emit(
            &session,
            Stage::Illustrating,
            format!("Illustrating {} of {} pages", billable, total),
            total,
        );

        let photo = personalization
            .photo()
            .and_then(|raw| self.assets.absolutize(raw));
        let cover = self
            .resolve_cover(&template, &personalization, &story, photo.as_deref())
            .await?;
        session.set_cover(cover.clone());
        let message = if cover.is_some() {
            "Cover ready"
        } else {
            "No cover available"
        };
        self.emit(&session, Stage::Illustrating, message, total);

        let context = PageContext {
            personalization: &personalization,
            cover: cover.as_deref(),
            photo: photo.as_deref(),
            mode,
        };
        let mut pages = stream::iter(template.pages().iter().zip(story.pages()).enumerate())
            .map(|(index, (spec, page))| self.illustrate_page(index, spec, page, &context))
            .buffered(self.config.effective_concurrency());

        while let Some(page) = pages.next().await {
            let page = page?;
            let page_number = *page.page_number();
            debug!(page_number, resolution = ?page.resolution(), "Page resolved");
            session.record_page(page);
            self.emit(
                &session,
                Stage::Illustrating,
                format!("Illustrated page {} of {}", page_number, total),
                total,
            );
        }

        session.complete();
        info!(resolved = session.resolved_count(), "Book illustrated");
        self.emit(&session, Stage::Illustrating, "Book complete", total);
        Ok(session)
    }

    /// Write and illustrate a book without persisting it.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write) and [`illustrate`](Self::illustrate).
    pub async fn run(
        &self,
        template: &StoryTemplate,
        personalization: &PersonalizationInput,
        mode: GenerationMode,
    ) -> StoryloomResult<SessionResult> {
        self.run_with_owner(template, personalization, mode, None)
            .await
    }

    /// Write, illustrate and, for an identified owner, persist a book.
    ///
    /// Persistence runs only when both an owner and a repository are present.
    /// A persistence failure leaves the session `Complete` and is reported as
    /// [`SessionResult::persistence_warning`].
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write) and [`illustrate`](Self::illustrate).
    pub async fn run_with_owner(
        &self,
        template: &StoryTemplate,
        personalization: &PersonalizationInput,
        mode: GenerationMode,
        owner: Option<&str>,
    ) -> StoryloomResult<SessionResult> {
        let draft = self.write(template, personalization).await?;
        let session = self.illustrate(draft, mode).await?;

        match (owner, self.repository.as_deref()) {
            (Some(owner), Some(repository)) => Ok(self
                .persist(repository, session, template, personalization, owner)
                .await),
            _ => {
                debug!("No owner or repository, book not persisted");
                Ok(SessionResult::new(session, None))
            }
        }
    }

    #[instrument(skip_all, fields(owner = %owner))]
    async fn persist(
        &self,
        repository: &dyn BookRepository,
        mut session: GenerationSession,
        template: &StoryTemplate,
        personalization: &PersonalizationInput,
        owner: &str,
    ) -> SessionResult {
        let total = template.page_count();
        self.emit(&session, Stage::Persisting, "Saving the book", total);

        let title = session
            .title()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| template.personalized_title(personalization.child_name()));
        let request = PersistRequest {
            title,
            personalization: personalization.clone(),
            pages: session.pages().clone(),
            cover_url: session.cover_image_url().clone(),
            template_id: template.id().clone(),
            owner_id: Some(owner.to_string()),
        };

        match repository.persist(&request).await {
            Ok(id) => {
                info!(book_id = %id, "Book saved");
                session.attach_book_id(id);
                self.emit(&session, Stage::Persisting, "Book saved", total);
                SessionResult::new(session, None)
            }
            Err(e) => {
                warn!(error = %e, "Book could not be saved");
                let warning = e.kind.to_string();
                self.emit(
                    &session,
                    Stage::Persisting,
                    format!("Book could not be saved: {}", warning),
                    total,
                );
                SessionResult::new(session, Some(warning))
            }
        }
    }

    async fn resolve_cover(
        &self,
        template: &StoryTemplate,
        personalization: &PersonalizationInput,
        story: &Story,
        photo: Option<&str>,
    ) -> StoryloomResult<Option<String>> {
        let template_cover = template
            .cover_image_url()
            .as_deref()
            .and_then(|raw| self.assets.absolutize(raw));

        let cover = match self.config.cover_priority() {
            CoverPriority::TemplateAsset => match template_cover {
                Some(url) => Some(url),
                None => self.synthesize_cover(personalization, story).await?,
            },
            CoverPriority::Synthesized => self
                .synthesize_cover(personalization, story)
                .await?
                .or(template_cover),
        };

        match (cover, photo) {
            (Some(cover), Some(photo)) => {
                self.ensure_active(Stage::Illustrating)?;
                Ok(Some(self.swap_face(&cover, photo).await.unwrap_or(cover)))
            }
            (cover, _) => Ok(cover),
        }
    }

    async fn synthesize_cover(
        &self,
        personalization: &PersonalizationInput,
        story: &Story,
    ) -> StoryloomResult<Option<String>> {
        self.ensure_active(Stage::Illustrating)?;
        let prompt = self
            .prompts
            .cover_prompt(personalization, story.title(), story.synopsis());
        Ok(self.synthesize(prompt).await)
    }

    #[instrument(skip_all, fields(page_number = *spec.page_number()))]
    async fn illustrate_page(
        &self,
        index: usize,
        spec: &PageSpec,
        page: &StoryPage,
        context: &PageContext<'_>,
    ) -> StoryloomResult<GeneratedPage> {
        let page_number = *spec.page_number();
        let text = page.text().clone();

        if !self.policy.should_fully_generate(index, context.mode) {
            debug!("Page skipped by cost policy");
            let placeholder = match self.config.skipped_placeholder() {
                SkippedPlaceholder::Cover => context.cover.map(str::to_string),
                SkippedPlaceholder::None => None,
            };
            return Ok(GeneratedPage::resolved(
                page_number,
                text,
                placeholder,
                ResolutionPath::Skipped,
            ));
        }

        let (scene, path) = match self.assets.cached_scene(spec) {
            Some(url) => (url, ResolutionPath::Cached),
            None => {
                self.ensure_active(Stage::Illustrating)?;
                let prompt = self
                    .prompts
                    .scene_prompt(context.personalization, scene_source(spec, page));
                match self.synthesize(prompt).await {
                    Some(url) => (url, ResolutionPath::Synthesized),
                    None => {
                        return Ok(GeneratedPage::resolved(
                            page_number,
                            text,
                            None,
                            ResolutionPath::Failed,
                        ));
                    }
                }
            }
        };

        let Some(photo) = context.photo else {
            return Ok(GeneratedPage::resolved(page_number, text, Some(scene), path));
        };

        self.ensure_active(Stage::Illustrating)?;
        let page = match self.swap_face(&scene, photo).await {
            Some(swapped) => {
                GeneratedPage::resolved(page_number, text, Some(swapped), path.with_swap())
            }
            None => GeneratedPage::resolved(page_number, text, Some(scene), path),
        };
        Ok(page)
    }

    /// Synthesized image URL, or `None` after logging the failure.
    async fn synthesize(&self, prompt: String) -> Option<String> {
        let request = match self.synthesis_request(prompt) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Could not build synthesis request");
                return None;
            }
        };
        match self.images.synthesize(&request).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(
                    provider = self.images.provider_name(),
                    error = %e,
                    "Image synthesis failed"
                );
                None
            }
        }
    }

    /// Swapped image URL, or `None` when the base image should be kept.
    async fn swap_face(&self, base_image_url: &str, photo: &str) -> Option<String> {
        let request = FaceSwapRequest::new(base_image_url, photo);
        match self.face_swap.swap(&request).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                warn!(
                    provider = self.face_swap.provider_name(),
                    "Face swap returned no image, keeping base image"
                );
                None
            }
            Err(e) => {
                warn!(
                    provider = self.face_swap.provider_name(),
                    error = %e,
                    "Face swap failed, keeping base image"
                );
                None
            }
        }
    }

    fn synthesis_request(&self, prompt: String) -> Result<SynthesisRequest, BuilderError> {
        let settings = self.config.synthesis();
        SynthesisRequest::builder()
            .prompt(prompt)
            .image_size(settings.image_size().clone())
            .steps(*settings.steps())
            .guidance_scale(*settings.guidance_scale())
            .safety_checker(*settings.safety_checker())
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))
    }

    fn theme_for(&self, template: &StoryTemplate) -> String {
        match &self.theme {
            ThemeSource::Template => template.theme().clone(),
            ThemeSource::Custom(theme) => theme.clone(),
        }
    }

    fn ensure_active(&self, stage: Stage) -> StoryloomResult<()> {
        if self.cancellation.is_cancelled() {
            warn!(stage = %stage, "Session cancelled");
            return Err(PipelineError::new(PipelineErrorKind::Cancelled(stage.to_string())).into());
        }
        Ok(())
    }

    fn emit(
        &self,
        session: &GenerationSession,
        stage: Stage,
        message: impl Into<String>,
        total: usize,
    ) {
        self.progress.report(session.snapshot(stage, message, total));
    }
}

/// Scene description for a page: template prompt, then the text service's
/// prompt, then the page text itself.
fn scene_source<'a>(spec: &'a PageSpec, page: &'a StoryPage) -> &'a str {
    [
        Some(spec.image_prompt().as_str()),
        page.image_prompt().as_deref(),
        Some(page.text().as_str()),
    ]
    .into_iter()
    .flatten()
    .find(|source| !source.trim().is_empty())
    .unwrap_or_default()
}

/// Order the story's pages and check them against the template.
fn check_story(mut story: Story, expected: usize) -> Result<Story, StoryGenerationError> {
    story.sort_pages();
    let actual = story.pages().len();
    if actual == 0 {
        return Err(StoryGenerationError::new(StoryGenerationErrorKind::EmptyPages));
    }
    if actual != expected {
        return Err(StoryGenerationError::new(
            StoryGenerationErrorKind::PageCountMismatch { expected, actual },
        ));
    }
    if let Some((position, page)) = story
        .pages()
        .iter()
        .enumerate()
        .find(|(i, p)| *p.page_number() as usize != i + 1)
    {
        return Err(StoryGenerationError::new(
            StoryGenerationErrorKind::PageNumbering {
                position,
                found: *page.page_number(),
            },
        ));
    }
    if let Some(blank) = story.pages().iter().find(|p| p.text().trim().is_empty()) {
        return Err(StoryGenerationError::new(
            StoryGenerationErrorKind::EmptyPageText(*blank.page_number()),
        ));
    }
    Ok(story)
}
