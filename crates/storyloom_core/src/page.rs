//! Per-page generation results.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Which strategy produced a page's final image.
///
/// # Examples
///
/// ```
/// use storyloom_core::ResolutionPath;
///
/// assert_eq!(ResolutionPath::SynthesizedSwapped.to_string(), "synthesized+swapped");
/// assert!(ResolutionPath::CachedSwapped.is_swapped());
/// assert_eq!(ResolutionPath::Cached.with_swap(), ResolutionPath::CachedSwapped);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ResolutionPath {
    /// Precomputed base image reused
    #[serde(rename = "cached")]
    #[display("cached")]
    Cached,
    /// Precomputed base image with the child's face swapped in
    #[serde(rename = "cached+swapped")]
    #[display("cached+swapped")]
    CachedSwapped,
    /// Scene synthesized from a prompt
    #[serde(rename = "synthesized")]
    #[display("synthesized")]
    Synthesized,
    /// Synthesized scene with the child's face swapped in
    #[serde(rename = "synthesized+swapped")]
    #[display("synthesized+swapped")]
    SynthesizedSwapped,
    /// Excluded by the cost policy
    #[serde(rename = "skipped")]
    #[display("skipped")]
    Skipped,
    /// Required external call failed with no fallback
    #[serde(rename = "failed")]
    #[display("failed")]
    Failed,
}

impl ResolutionPath {
    /// Whether a face swap contributed to the image.
    pub fn is_swapped(self) -> bool {
        matches!(
            self,
            ResolutionPath::CachedSwapped | ResolutionPath::SynthesizedSwapped
        )
    }

    /// The swapped counterpart of a scene path; other paths are returned unchanged.
    pub fn with_swap(self) -> Self {
        match self {
            ResolutionPath::Cached => ResolutionPath::CachedSwapped,
            ResolutionPath::Synthesized => ResolutionPath::SynthesizedSwapped,
            other => other,
        }
    }
}

/// A page of the generated book.
///
/// `resolution` and `image_url` stay empty until the illustrating stage
/// reaches the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPage {
    /// 1-based page number, the sole ordering key
    page_number: u32,
    /// Page text, editable by the caller before illustrating
    text: String,
    /// Final image, if any
    image_url: Option<String>,
    /// How the image was obtained
    resolution: Option<ResolutionPath>,
}

impl GeneratedPage {
    /// A page awaiting illustration.
    pub fn pending(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            image_url: None,
            resolution: None,
        }
    }

    /// A page with its image resolved.
    pub fn resolved(
        page_number: u32,
        text: impl Into<String>,
        image_url: Option<String>,
        resolution: ResolutionPath,
    ) -> Self {
        Self {
            page_number,
            text: text.into(),
            image_url,
            resolution: Some(resolution),
        }
    }

    /// Whether the illustrating stage has reached this page.
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}
