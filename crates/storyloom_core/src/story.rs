//! Generated narrative types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One page of generated narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct StoryPage {
    /// 1-based page number
    page_number: u32,
    /// Body text
    #[serde(default)]
    text: String,
    /// Illustration prompt suggested by the text service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_prompt: Option<String>,
}

impl StoryPage {
    /// Create a story page.
    pub fn new(page_number: u32, text: impl Into<String>, image_prompt: Option<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            image_prompt,
        }
    }

    /// Replace the body text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// A structured story returned by the text generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Story {
    /// Story title
    title: String,
    /// Short synopsis
    #[serde(default)]
    synopsis: String,
    /// Ordered pages
    #[serde(default)]
    pages: Vec<StoryPage>,
}

impl Story {
    /// Create a story.
    pub fn new(title: impl Into<String>, synopsis: impl Into<String>, pages: Vec<StoryPage>) -> Self {
        Self {
            title: title.into(),
            synopsis: synopsis.into(),
            pages,
        }
    }

    /// Mutable access to a page by number.
    pub fn page_mut(&mut self, page_number: u32) -> Option<&mut StoryPage> {
        self.pages.iter_mut().find(|p| p.page_number == page_number)
    }

    /// Sort pages by page number; the text service does not always preserve order.
    pub fn sort_pages(&mut self) {
        self.pages.sort_by_key(|p| p.page_number);
    }
}
