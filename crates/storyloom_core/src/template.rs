//! Static, theme-level story definitions.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One page of a template document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    /// 1-based page number
    page_number: u32,
    /// Reference page text
    text: String,
    /// Scene description for the illustration
    #[serde(default)]
    image_prompt: String,
    /// Precomputed scene image usable instead of synthesis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_image_url: Option<String>,
}

impl PageSpec {
    /// Create a page spec.
    pub fn new(
        page_number: u32,
        text: impl Into<String>,
        image_prompt: impl Into<String>,
        base_image_url: Option<String>,
    ) -> Self {
        Self {
            page_number,
            text: text.into(),
            image_prompt: image_prompt.into(),
            base_image_url,
        }
    }
}

/// The JSON document embedded in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    /// Story title
    title: String,
    /// Short synopsis
    #[serde(default)]
    synopsis: String,
    /// Ordered page specs
    pages: Vec<PageSpec>,
}

impl TemplateDocument {
    /// Create a template document.
    pub fn new(title: impl Into<String>, synopsis: impl Into<String>, pages: Vec<PageSpec>) -> Self {
        Self {
            title: title.into(),
            synopsis: synopsis.into(),
            pages,
        }
    }
}

/// A story template, immutable for the lifetime of a session.
///
/// # Examples
///
/// ```
/// use storyloom_core::StoryTemplate;
///
/// let json = r#"{
///     "id": "tpl-hair",
///     "theme": "Les Cheveux",
///     "titlePattern": "{name} and the Magic Curls",
///     "coverImageUrl": "/covers/hair.png",
///     "document": {
///         "title": "The Magic Curls",
///         "synopsis": "A child learns to love their hair.",
///         "pages": [
///             { "pageNumber": 1, "text": "Once upon a time", "imagePrompt": "a bedroom" }
///         ]
///     }
/// }"#;
///
/// let template = StoryTemplate::from_json(json).unwrap();
/// assert_eq!(template.page_count(), 1);
/// assert_eq!(template.personalized_title("Fatou"), "Fatou and the Magic Curls");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct StoryTemplate {
    /// Template identifier, recorded on persisted books
    id: String,
    /// Theme identifier passed to the text generation service
    theme: String,
    /// Title with a `{name}` placeholder
    #[serde(default)]
    title_pattern: String,
    /// Static cover asset, possibly host-relative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cover_image_url: Option<String>,
    /// Title, synopsis and page specs
    document: TemplateDocument,
}

impl StoryTemplate {
    /// Create a template.
    pub fn new(
        id: impl Into<String>,
        theme: impl Into<String>,
        title_pattern: impl Into<String>,
        cover_image_url: Option<String>,
        document: TemplateDocument,
    ) -> Self {
        Self {
            id: id.into(),
            theme: theme.into(),
            title_pattern: title_pattern.into(),
            cover_image_url,
            document,
        }
    }

    /// Parse a template from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns the serde error message if the document does not parse.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Number of pages the generated book must have.
    pub fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    /// Page specs in template order.
    pub fn pages(&self) -> &[PageSpec] {
        &self.document.pages
    }

    /// Spec for a 1-based page number.
    pub fn page(&self, page_number: u32) -> Option<&PageSpec> {
        self.document
            .pages
            .iter()
            .find(|p| p.page_number == page_number)
    }

    /// Title pattern with the child's name substituted.
    ///
    /// Falls back to the document title when no pattern is set.
    pub fn personalized_title(&self, child_name: &str) -> String {
        if self.title_pattern.trim().is_empty() {
            self.document.title.clone()
        } else {
            self.title_pattern.replace("{name}", child_name)
        }
    }

    /// Checks that pages are numbered 1..=N in order.
    ///
    /// # Errors
    ///
    /// Returns a description of the first structural problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.document.pages.is_empty() {
            return Err(format!("template '{}' has no pages", self.id));
        }
        for (index, page) in self.document.pages.iter().enumerate() {
            let expected = index as u32 + 1;
            if page.page_number != expected {
                return Err(format!(
                    "template '{}' page at position {} is numbered {}",
                    self.id, expected, page.page_number
                ));
            }
        }
        Ok(())
    }
}
