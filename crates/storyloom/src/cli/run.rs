//! Book generation command handler.

use super::{RunArgs, load_template};
use std::path::Path;
use storyloom::{
    BuilderError, GenerationSession, PersonalizationInput, ProgressReporter, SessionResult,
    StoryloomConfig, StoryloomResult, ThemeSource, controller_from_config,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Environment variable holding the bearer token for the services.
const API_KEY_VAR: &str = "STORYLOOM_API_KEY";

/// Generate a book and print the result as JSON on stdout.
pub async fn run_book(args: RunArgs, config_path: Option<&Path>) -> StoryloomResult<()> {
    let config = StoryloomConfig::load(config_path)?;
    let template = load_template(&args.template)?;
    let personalization = PersonalizationInput::builder()
        .child_name(args.name)
        .child_age(args.age)
        .gender(args.gender)
        .photo_url(args.photo)
        .build()
        .map_err(|e| BuilderError::from(e.to_string()))?;

    let api_key = std::env::var(API_KEY_VAR).ok();
    if api_key.is_none() {
        warn!("{} not set, calling services without credentials", API_KEY_VAR);
    }

    if args.owner.is_some() && config.services().persistence_url().is_none() {
        warn!("--owner given but no persistence_url configured, the book will not be saved");
    }

    let cancellation = CancellationToken::new();
    let (reporter, mut updates) = ProgressReporter::channel();
    let mut controller = controller_from_config(&config, api_key)?
        .with_progress(Box::new(reporter))
        .with_cancellation(cancellation.clone());
    if let Some(theme) = args.theme {
        controller = controller.with_theme(ThemeSource::Custom(theme));
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling generation");
            cancellation.cancel();
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            eprintln!("[{:>3}%] {}", update.percent(), update.message());
        }
    });

    let outcome = controller
        .run_with_owner(&template, &personalization, args.mode, args.owner.as_deref())
        .await;
    // Dropping the controller closes the progress channel.
    drop(controller);
    printer.await.ok();

    let result = outcome?;
    if let Some(warning) = result.persistence_warning() {
        warn!(warning = %warning, "Book generated but not saved");
    }
    info!(
        resolved = result.session().resolved_count(),
        "Generation finished"
    );
    println!("{}", summary(&result));
    Ok(())
}

fn summary(result: &SessionResult) -> String {
    let session: &GenerationSession = result.session();
    let value = serde_json::json!({
        "status": session.status().to_string(),
        "title": session.title(),
        "mode": session.mode().map(|m| m.to_string()),
        "coverImageUrl": session.cover_image_url(),
        "pages": session.pages(),
        "bookId": session.persisted_book_id(),
        "persistenceWarning": result.persistence_warning(),
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
