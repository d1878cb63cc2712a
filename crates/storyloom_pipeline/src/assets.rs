//! Asset reuse and URL normalisation.

use storyloom_core::PageSpec;
use storyloom_error::{ConfigError, StoryloomResult};
use tracing::warn;
use url::Url;

/// Resolves precomputed scene images and absolutises asset URLs.
///
/// The image and face swap services cannot resolve host-relative paths such
/// as `/covers/hair.png`, so every URL handed to them goes through
/// [`absolutize`](Self::absolutize).
///
/// # Examples
///
/// ```
/// use storyloom_pipeline::AssetResolver;
///
/// let resolver = AssetResolver::new(Some("https://books.example.com")).unwrap();
/// assert_eq!(
///     resolver.absolutize("/covers/hair.png").as_deref(),
///     Some("https://books.example.com/covers/hair.png")
/// );
/// assert_eq!(
///     resolver.absolutize("https://cdn.example.com/a.png").as_deref(),
///     Some("https://cdn.example.com/a.png")
/// );
/// assert_eq!(resolver.absolutize("  "), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssetResolver {
    base: Option<Url>,
}

impl AssetResolver {
    /// Create a resolver with an optional base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base URL does not parse.
    pub fn new(base_url: Option<&str>) -> StoryloomResult<Self> {
        let base = base_url
            .map(|raw| {
                Url::parse(raw).map_err(|e| {
                    ConfigError::new(format!("Invalid asset base URL '{}': {}", raw, e))
                })
            })
            .transpose()?;
        Ok(Self { base })
    }

    /// Turn a possibly host-relative URL into a fully-qualified one.
    ///
    /// Blank input yields `None`. Relative input without a configured base is
    /// returned unchanged.
    pub fn absolutize(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if Url::parse(trimmed).is_ok() {
            return Some(trimmed.to_string());
        }
        match &self.base {
            Some(base) => match base.join(trimmed) {
                Ok(joined) => Some(joined.to_string()),
                Err(e) => {
                    warn!(url = %trimmed, error = %e, "Could not resolve asset URL against base");
                    Some(trimmed.to_string())
                }
            },
            None => {
                warn!(url = %trimmed, "Relative asset URL with no asset_base_url configured");
                Some(trimmed.to_string())
            }
        }
    }

    /// Precomputed scene image for a page, if the template provides one.
    pub fn cached_scene(&self, spec: &PageSpec) -> Option<String> {
        spec.base_image_url()
            .as_deref()
            .and_then(|url| self.absolutize(url))
    }
}
