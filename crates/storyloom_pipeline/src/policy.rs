//! Cost-optimization policy.

use storyloom_core::GenerationMode;

/// Decides whether a page is worth illustrating in the current mode.
///
/// Unpurchased previews only illustrate the first `preview_threshold` pages;
/// paid books illustrate everything. The cover is never subject to this policy.
///
/// # Examples
///
/// ```
/// use storyloom_core::GenerationMode;
/// use storyloom_pipeline::CostPolicy;
///
/// let policy = CostPolicy::new(2);
/// assert!(policy.should_fully_generate(1, GenerationMode::Preview));
/// assert!(!policy.should_fully_generate(2, GenerationMode::Preview));
/// assert!(policy.should_fully_generate(9, GenerationMode::Full));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostPolicy {
    preview_threshold: usize,
}

impl CostPolicy {
    /// Create a policy with the given zero-based preview threshold.
    pub fn new(preview_threshold: usize) -> Self {
        Self { preview_threshold }
    }

    /// Zero-based index of the first page skipped in preview mode.
    pub fn preview_threshold(&self) -> usize {
        self.preview_threshold
    }

    /// Whether the page at `page_index` gets full generation.
    pub fn should_fully_generate(&self, page_index: usize, mode: GenerationMode) -> bool {
        match mode {
            GenerationMode::Full => true,
            GenerationMode::Preview => page_index < self.preview_threshold,
        }
    }

    /// Number of pages that will be illustrated out of `page_count`.
    pub fn billable_pages(&self, page_count: usize, mode: GenerationMode) -> usize {
        (0..page_count)
            .filter(|index| self.should_fully_generate(*index, mode))
            .count()
    }
}
