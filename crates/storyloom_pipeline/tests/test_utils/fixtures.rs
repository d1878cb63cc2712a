//! Templates, stories and children used across pipeline tests.

use storyloom_core::{
    Gender, PageSpec, PersonalizationInput, Story, StoryPage, StoryTemplate, TemplateDocument,
};
use storyloom_pipeline::PipelineConfig;

pub const ASSET_BASE: &str = "https://books.test";
pub const TEMPLATE_COVER: &str = "/covers/hair.png";
pub const ABSOLUTE_COVER: &str = "https://books.test/covers/hair.png";

/// Template with `pages` pages whose scene prompts read `scene N`.
pub fn hair_template(pages: u32) -> StoryTemplate {
    template_with(pages, Some(TEMPLATE_COVER.to_string()), |_| None)
}

/// Template whose pages may carry precomputed scene images.
pub fn template_with(
    pages: u32,
    cover: Option<String>,
    base_image: impl Fn(u32) -> Option<String>,
) -> StoryTemplate {
    let specs = (1..=pages)
        .map(|n| PageSpec::new(n, format!("Reference text {}", n), format!("scene {}", n), base_image(n)))
        .collect();
    StoryTemplate::new(
        "tpl-hair",
        "Les Cheveux",
        "{name} et ses cheveux magiques",
        cover,
        TemplateDocument::new("Les cheveux magiques", "A child learns to love their hair.", specs),
    )
}

/// Story matching a template of `pages` pages, returned out of order.
pub fn story(pages: u32) -> Story {
    let pages = (1..=pages)
        .rev()
        .map(|n| StoryPage::new(n, format!("Page {} text", n), None))
        .collect();
    Story::new("Les cheveux de Fatou", "Fatou discovers her curls.", pages)
}

pub fn fatou() -> PersonalizationInput {
    PersonalizationInput::builder()
        .child_name("Fatou")
        .child_age(5u32)
        .gender(Gender::Girl)
        .build()
        .expect("valid personalization")
}

pub fn kofi_with_photo() -> PersonalizationInput {
    PersonalizationInput::builder()
        .child_name("Kofi")
        .child_age(6u32)
        .gender(Gender::Boy)
        .photo_url(Some("https://photos.test/kofi.jpg".to_string()))
        .build()
        .expect("valid personalization")
}

pub fn config() -> PipelineConfig {
    PipelineConfig::default().with_asset_base_url(Some(ASSET_BASE.to_string()))
}
