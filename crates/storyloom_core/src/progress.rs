//! Incremental progress snapshots.

use crate::{GeneratedPage, SessionStatus, Stage};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A read-only snapshot emitted after each pipeline step.
///
/// Progress is derived from the number of pages actually resolved.
///
/// # Examples
///
/// ```
/// use storyloom_core::{ProgressUpdate, SessionStatus, Stage};
///
/// let update = ProgressUpdate::new(
///     Stage::Illustrating,
///     SessionStatus::Illustrating,
///     "Illustrated page 3 of 10",
///     3,
///     10,
///     None,
///     vec![],
/// );
/// assert_eq!(update.percent(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    /// Pipeline stage that produced the update
    stage: Stage,
    /// Session status at emission time
    status: SessionStatus,
    /// Human-readable message
    message: String,
    /// Pages resolved so far
    completed: usize,
    /// Pages in the book
    total: usize,
    /// Cover image at emission time
    cover_image_url: Option<String>,
    /// Pages in ascending page order
    pages: Vec<GeneratedPage>,
}

impl ProgressUpdate {
    /// Create a progress snapshot.
    pub fn new(
        stage: Stage,
        status: SessionStatus,
        message: impl Into<String>,
        completed: usize,
        total: usize,
        cover_image_url: Option<String>,
        pages: Vec<GeneratedPage>,
    ) -> Self {
        Self {
            stage,
            status,
            message: message.into(),
            completed,
            total,
            cover_image_url,
            pages,
        }
    }

    /// Completion percentage in `0..=100`.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return if self.status == SessionStatus::Complete { 100 } else { 0 };
        }
        ((self.completed.min(self.total) * 100) / self.total) as u8
    }
}
