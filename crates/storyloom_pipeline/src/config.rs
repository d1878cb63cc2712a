//! Configuration for the generation pipeline.
//!
//! This module provides TOML-based configuration. The configuration system
//! supports:
//! - Bundled defaults (include_str! from storyloom.toml)
//! - User overrides (~/.config/storyloom/storyloom.toml, then ./storyloom.toml)
//! - An explicit file passed by the caller, with the highest precedence

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyloom_error::{ConfigError, StoryloomError, StoryloomResult};
use tracing::{debug, instrument};

/// Upper bound on pages illustrated concurrently.
const MAX_CONCURRENCY: usize = 3;

/// Image shown for pages the cost policy skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkippedPlaceholder {
    /// Reuse the session's cover image as a teaser
    #[default]
    Cover,
    /// Leave the page without an image
    None,
}

/// Which cover source is tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverPriority {
    /// Template's static cover; synthesize from the title only if the template has none
    #[default]
    TemplateAsset,
    /// Synthesize from the title; fall back to the template's static cover
    Synthesized,
}

/// Parameters sent with every synthesis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct SynthesisSettings {
    /// Named image size understood by the service
    image_size: String,
    /// Inference steps
    steps: u32,
    /// Guidance scale
    guidance_scale: f32,
    /// Whether the service's safety checker is on
    safety_checker: bool,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            image_size: "square_hd".to_string(),
            steps: 28,
            guidance_scale: 3.5,
            safety_checker: true,
        }
    }
}

/// Orchestration settings.
///
/// # Examples
///
/// ```
/// use storyloom_pipeline::{PipelineConfig, SkippedPlaceholder};
///
/// let config = PipelineConfig::default()
///     .with_preview_threshold(3)
///     .with_skipped_placeholder(SkippedPlaceholder::None)
///     .with_illustration_concurrency(8);
///
/// assert_eq!(*config.preview_threshold(), 3);
/// assert_eq!(config.effective_concurrency(), 3);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct PipelineConfig {
    /// Pages at or beyond this index are skipped in preview mode
    preview_threshold: usize,
    /// Image shown on skipped pages
    skipped_placeholder: SkippedPlaceholder,
    /// Cover source order
    cover_priority: CoverPriority,
    /// Pages illustrated concurrently, clamped to 1..=3
    illustration_concurrency: usize,
    /// Base used to absolutise host-relative asset URLs
    asset_base_url: Option<String>,
    /// Fixed physical-description tokens keeping the child consistent across pages
    subject_traits: Vec<String>,
    /// Composition and style modifiers appended to every prompt
    style_modifiers: Vec<String>,
    /// Synthesis request parameters
    synthesis: SynthesisSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            preview_threshold: 2,
            skipped_placeholder: SkippedPlaceholder::default(),
            cover_priority: CoverPriority::default(),
            illustration_concurrency: 1,
            asset_base_url: None,
            subject_traits: vec![
                "warm brown skin".to_string(),
                "big expressive brown eyes".to_string(),
                "curly black hair".to_string(),
                "bright friendly smile".to_string(),
            ],
            style_modifiers: vec![
                "children's book illustration".to_string(),
                "soft watercolor textures".to_string(),
                "vibrant warm colors".to_string(),
                "full body".to_string(),
                "centered composition".to_string(),
                "consistent character design".to_string(),
            ],
            synthesis: SynthesisSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Concurrency actually used by the illustrating stage.
    pub fn effective_concurrency(&self) -> usize {
        self.illustration_concurrency.clamp(1, MAX_CONCURRENCY)
    }
}

/// Locations of the external services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ServicesConfig {
    /// Text generation endpoint
    text_url: String,
    /// Image synthesis endpoint
    image_url: String,
    /// Face swap endpoint
    face_swap_url: String,
    /// Book persistence endpoint; persistence is disabled when absent
    persistence_url: Option<String>,
    /// Per-request timeout in seconds
    timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            text_url: String::new(),
            image_url: String::new(),
            face_swap_url: String::new(),
            persistence_url: None,
            timeout_secs: 120,
        }
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StoryloomConfig {
    /// Orchestration settings
    pipeline: PipelineConfig,
    /// External service locations
    services: ServicesConfig,
}

impl StoryloomConfig {
    /// Load configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryloomResult<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: explicit file > current dir > home dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// configuration is invalid.
    #[instrument(skip(explicit))]
    pub fn load(explicit: Option<&Path>) -> StoryloomResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../storyloom.toml");

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyloom/storyloom.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder.add_source(config::File::with_name("storyloom").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path));
        }

        let config: Self = builder
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to load configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        debug!(
            preview_threshold = config.pipeline.preview_threshold,
            concurrency = config.pipeline.effective_concurrency(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first problem found.
    pub fn validate(&self) -> StoryloomResult<()> {
        if let Some(base) = self.pipeline.asset_base_url() {
            url::Url::parse(base).map_err(|e| {
                ConfigError::new(format!("asset_base_url '{}' is not a valid URL: {}", base, e))
            })?;
        }
        if self.services.timeout_secs == 0 {
            return Err(ConfigError::new("services.timeout_secs must be positive").into());
        }
        if self.pipeline.synthesis.steps == 0 {
            return Err(ConfigError::new("synthesis.steps must be positive").into());
        }
        Ok(())
    }
}
