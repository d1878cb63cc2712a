//! Template validation command handler.

use std::path::Path;
use storyloom::{ConfigError, JsonError, PipelineError, PipelineErrorKind, StoryTemplate, StoryloomResult};
use tracing::info;

/// Read and parse a template file.
pub fn load_template(path: &Path) -> StoryloomResult<StoryTemplate> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!("Failed to read template {}: {}", path.display(), e))
    })?;
    let template = StoryTemplate::from_json(&raw)
        .map_err(|e| JsonError::new(format!("Invalid template {}: {}", path.display(), e)))?;
    Ok(template)
}

/// Parse and check a template, printing a one-line summary.
pub fn validate_template(path: &Path) -> StoryloomResult<()> {
    let template = load_template(path)?;
    template
        .validate()
        .map_err(|m| PipelineError::new(PipelineErrorKind::InvalidTemplate(m)))?;

    let cached = template
        .pages()
        .iter()
        .filter(|p| p.base_image_url().is_some())
        .count();
    info!(template_id = %template.id(), pages = template.page_count(), "Template is valid");
    println!(
        "{}: {} pages, {} with precomputed scenes, cover {}",
        template.id(),
        template.page_count(),
        cached,
        template.cover_image_url().as_deref().unwrap_or("(synthesized)")
    );
    Ok(())
}
