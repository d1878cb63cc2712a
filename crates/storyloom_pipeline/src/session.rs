//! Session state owned by the stage controller.
//!
//! Callers read sessions through getters and progress snapshots; every
//! mutation goes through crate-private methods used by the controller.

use derive_getters::Getters;
use storyloom_core::{
    BookId, GeneratedPage, GenerationMode, PersonalizationInput, ProgressUpdate, SessionStatus,
    Stage, Story, StoryTemplate,
};
use storyloom_error::{PipelineError, PipelineErrorKind, StoryloomResult};
use tracing::debug;

/// Working state of one personalization request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct GenerationSession {
    /// Lifecycle status
    status: SessionStatus,
    /// Generated narrative, set once Writing succeeds
    story: Option<Story>,
    /// Final cover image
    cover_image_url: Option<String>,
    /// Pages in ascending page order
    pages: Vec<GeneratedPage>,
    /// Id assigned by persistence
    persisted_book_id: Option<BookId>,
    /// Mode the pages were illustrated in
    mode: Option<GenerationMode>,
}

impl GenerationSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A session resuming from an accepted story.
    pub(crate) fn written(story: Story) -> Self {
        let mut session = Self::new();
        session.begin_writing();
        session.accept_story(story);
        session
    }

    pub(crate) fn begin_writing(&mut self) {
        if self.status == SessionStatus::Init {
            self.status = SessionStatus::Writing;
        }
    }

    pub(crate) fn accept_story(&mut self, story: Story) {
        if self.status == SessionStatus::Writing {
            self.story = Some(story);
        }
    }

    pub(crate) fn fail(&mut self) {
        if !self.status.is_terminal() {
            self.status = SessionStatus::Failed;
        }
    }

    /// Enter Illustrating with one pending page per story page.
    pub(crate) fn begin_illustrating(&mut self, mode: GenerationMode) {
        if self.status != SessionStatus::Writing {
            return;
        }
        let Some(story) = &self.story else {
            return;
        };
        self.pages = story
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| GeneratedPage::pending(index as u32 + 1, page.text().clone()))
            .collect();
        self.mode = Some(mode);
        self.status = SessionStatus::Illustrating;
    }

    pub(crate) fn set_cover(&mut self, cover: Option<String>) {
        if self.status == SessionStatus::Illustrating {
            self.cover_image_url = cover;
        }
    }

    /// Replace the pending page with the same page number.
    pub(crate) fn record_page(&mut self, page: GeneratedPage) {
        if self.status != SessionStatus::Illustrating {
            return;
        }
        let index = (*page.page_number() as usize).saturating_sub(1);
        match self.pages.get_mut(index) {
            Some(slot) if slot.page_number() == page.page_number() => *slot = page,
            _ => debug!(page_number = page.page_number(), "Ignoring page outside the book"),
        }
    }

    pub(crate) fn complete(&mut self) {
        if self.status == SessionStatus::Illustrating {
            self.status = SessionStatus::Complete;
        }
    }

    pub(crate) fn attach_book_id(&mut self, id: BookId) {
        if self.status == SessionStatus::Complete {
            self.persisted_book_id = Some(id);
        }
    }

    /// Pages whose image has been resolved.
    pub fn resolved_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_resolved()).count()
    }

    /// Book title, if the story has been written.
    pub fn title(&self) -> Option<&str> {
        self.story.as_ref().map(|s| s.title().as_str())
    }

    /// Owned, read-only copy of the current state for progress reporting.
    pub(crate) fn snapshot(
        &self,
        stage: Stage,
        message: impl Into<String>,
        total: usize,
    ) -> ProgressUpdate {
        ProgressUpdate::new(
            stage,
            self.status,
            message,
            self.resolved_count(),
            total,
            self.cover_image_url.clone(),
            self.pages.clone(),
        )
    }
}

/// A written but not yet illustrated book.
///
/// Returned by [`StageController::write`](crate::StageController::write) so the
/// caller can edit page text before illustrating.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BookDraft {
    /// Template the book is generated from
    template: StoryTemplate,
    /// Personalization the story was written for
    personalization: PersonalizationInput,
    /// Validated story, pages in ascending order
    story: Story,
}

impl BookDraft {
    pub(crate) fn new(
        template: StoryTemplate,
        personalization: PersonalizationInput,
        story: Story,
    ) -> Self {
        Self {
            template,
            personalization,
            story,
        }
    }

    pub(crate) fn into_parts(self) -> (StoryTemplate, PersonalizationInput, Story) {
        (self.template, self.personalization, self.story)
    }

    /// Replace the text of one page before illustrating.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::UnknownPage`] if the page does not exist.
    pub fn edit_page_text(&mut self, page_number: u32, text: impl Into<String>) -> StoryloomResult<()> {
        let page = self
            .story
            .page_mut(page_number)
            .ok_or_else(|| PipelineError::new(PipelineErrorKind::UnknownPage(page_number)))?;
        page.set_text(text);
        Ok(())
    }
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Getters)]
pub struct SessionResult {
    /// Terminal session state
    session: GenerationSession,
    /// Set when persistence was attempted and failed
    persistence_warning: Option<String>,
}

impl SessionResult {
    pub(crate) fn new(session: GenerationSession, persistence_warning: Option<String>) -> Self {
        Self {
            session,
            persistence_warning,
        }
    }

    /// Consume the result and return the session.
    pub fn into_session(self) -> GenerationSession {
        self.session
    }
}
