//! Session mode, status and stage enums.

use serde::{Deserialize, Serialize};

/// How much of a book is worth generating eagerly.
///
/// # Examples
///
/// ```
/// use storyloom_core::GenerationMode;
///
/// let mode: GenerationMode = "preview".parse().unwrap();
/// assert_eq!(mode, GenerationMode::Preview);
/// assert_eq!(format!("{}", GenerationMode::Full), "full");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GenerationMode {
    /// Paid book, every page is illustrated
    #[default]
    #[display("full")]
    Full,
    /// Unpurchased preview, only the first pages are illustrated
    #[display("preview")]
    Preview,
}

/// Lifecycle status of a generation session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum SessionStatus {
    /// Created, nothing requested yet
    #[default]
    Init,
    /// Waiting on the text generation service
    Writing,
    /// Resolving the cover and page illustrations
    Illustrating,
    /// Every page resolved
    Complete,
    /// Writing failed; terminal
    Failed,
}

impl SessionStatus {
    /// Whether no further stage may run.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Complete | SessionStatus::Failed)
    }
}

/// Pipeline phase reported in progress updates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Stage {
    /// Narrative text generation
    Writing,
    /// Cover and page illustration
    Illustrating,
    /// Handing the finished book to storage
    Persisting,
}
