//! Scene prompt composition.

use storyloom_core::{Gender, PersonalizationInput};

/// Composes image prompts from fixed subject tokens, the scene and style modifiers.
///
/// The subject description is identical on every page so the synthesized child
/// looks the same throughout the book.
///
/// # Examples
///
/// ```
/// use storyloom_core::{Gender, PersonalizationInput};
/// use storyloom_pipeline::ScenePromptBuilder;
///
/// let builder = ScenePromptBuilder::new(
///     vec!["curly black hair".to_string()],
///     vec!["watercolor".to_string()],
/// );
/// let child = PersonalizationInput::builder()
///     .child_name("Fatou")
///     .child_age(5u32)
///     .gender(Gender::Girl)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     builder.scene_prompt(&child, "{name} brushing her hair"),
///     "a 5-year-old girl, curly black hair, Fatou brushing her hair, watercolor"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenePromptBuilder {
    subject_traits: Vec<String>,
    style_modifiers: Vec<String>,
}

impl ScenePromptBuilder {
    /// Create a builder from subject traits and style modifiers.
    pub fn new(subject_traits: Vec<String>, style_modifiers: Vec<String>) -> Self {
        Self {
            subject_traits,
            style_modifiers,
        }
    }

    /// Prompt for one page scene.
    pub fn scene_prompt(&self, personalization: &PersonalizationInput, scene: &str) -> String {
        let scene = scene.replace("{name}", personalization.child_name());
        self.compose(personalization, scene.trim())
    }

    /// Prompt for a synthesized cover.
    pub fn cover_prompt(
        &self,
        personalization: &PersonalizationInput,
        title: &str,
        synopsis: &str,
    ) -> String {
        let scene = if synopsis.trim().is_empty() {
            format!("book cover for \"{}\"", title.trim())
        } else {
            format!("book cover for \"{}\", {}", title.trim(), synopsis.trim())
        };
        self.scene_prompt(personalization, &scene)
    }

    fn compose(&self, personalization: &PersonalizationInput, scene: &str) -> String {
        let noun = match personalization.gender() {
            Gender::Girl => "girl",
            Gender::Boy => "boy",
        };
        let subject = format!("a {}-year-old {}", personalization.child_age(), noun);

        std::iter::once(subject.as_str())
            .chain(self.subject_traits.iter().map(String::as_str))
            .chain((!scene.is_empty()).then_some(scene))
            .chain(self.style_modifiers.iter().map(String::as_str))
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kofi() -> PersonalizationInput {
        PersonalizationInput::builder()
            .child_name("Kofi")
            .child_age(7u32)
            .gender(Gender::Boy)
            .build()
            .unwrap()
    }

    #[test]
    fn test_subject_is_identical_across_scenes() {
        let builder = ScenePromptBuilder::new(vec!["short black hair".to_string()], vec![]);
        let first = builder.scene_prompt(&kofi(), "on a boat");
        let second = builder.scene_prompt(&kofi(), "in a market");
        assert!(first.starts_with("a 7-year-old boy, short black hair, "));
        assert!(second.starts_with("a 7-year-old boy, short black hair, "));
    }

    #[test]
    fn test_empty_scene_dropped() {
        let builder = ScenePromptBuilder::new(vec![], vec!["flat colors".to_string()]);
        assert_eq!(builder.scene_prompt(&kofi(), "   "), "a 7-year-old boy, flat colors");
    }

    #[test]
    fn test_cover_prompt_mentions_title() {
        let builder = ScenePromptBuilder::default();
        let prompt = builder.cover_prompt(&kofi(), "Kofi Sails Away", "");
        assert_eq!(prompt, "a 7-year-old boy, book cover for \"Kofi Sails Away\"");
    }
}
