//! Storyloom CLI binary.
//!
//! This binary provides command-line access to the generation pipeline:
//! - Generate a personalized book from a template file
//! - Validate a template file

use clap::Parser;
use storyloom::{ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_book, validate_template};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_observability_with_config(
        ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    match cli.command {
        Commands::Run(args) => {
            run_book(args, cli.config.as_deref()).await?;
        }

        Commands::Validate { template } => {
            validate_template(&template)?;
        }
    }

    Ok(())
}
