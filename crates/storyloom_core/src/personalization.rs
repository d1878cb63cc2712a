//! Child personalization input.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Gender used for pronouns in the story and the subject description in prompts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    /// Girl
    #[display("girl")]
    Girl,
    /// Boy
    #[display("boy")]
    Boy,
}

/// Personalization data for one book.
///
/// A missing `photo_url` disables face swapping for the whole session.
///
/// # Examples
///
/// ```
/// use storyloom_core::{Gender, PersonalizationInput};
///
/// let input = PersonalizationInput::builder()
///     .child_name("Kofi")
///     .child_age(6u32)
///     .gender(Gender::Boy)
///     .photo_url(Some("https://cdn.example.com/kofi.jpg".to_string()))
///     .build()
///     .unwrap();
///
/// assert!(input.has_photo());
/// assert!(input.validate().is_ok());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationInput {
    /// Child's first name
    child_name: String,
    /// Child's age in years
    child_age: u32,
    /// Child's gender
    gender: Gender,
    /// Photo of the child used as the face swap source
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
}

impl PersonalizationInput {
    /// Creates a new builder for `PersonalizationInput`.
    pub fn builder() -> PersonalizationInputBuilder {
        PersonalizationInputBuilder::default()
    }

    /// Whether a usable photo was supplied.
    pub fn has_photo(&self) -> bool {
        self.photo_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// The photo URL, ignoring blank values.
    pub fn photo(&self) -> Option<&str> {
        self.photo_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.child_name.trim().is_empty() {
            return Err("child name must not be empty".to_string());
        }
        if self.child_age == 0 {
            return Err("child age must be a positive integer".to_string());
        }
        Ok(())
    }
}
