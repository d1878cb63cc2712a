//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storyloom::{Gender, GenerationMode};

/// Storyloom - personalized children's book generation
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(about = "Generate personalized, illustrated children's books", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file overriding the bundled and user defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a book from a template
    Run(RunArgs),

    /// Check that a template file parses and is well formed
    Validate {
        /// Path to the template JSON file
        #[arg(long)]
        template: PathBuf,
    },
}

/// Arguments for `storyloom run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the template JSON file
    #[arg(long)]
    pub template: PathBuf,

    /// Child's first name
    #[arg(long)]
    pub name: String,

    /// Child's age in years
    #[arg(long)]
    pub age: u32,

    /// Child's gender (girl or boy)
    #[arg(long)]
    pub gender: Gender,

    /// Photo of the child for face swap
    #[arg(long)]
    pub photo: Option<String>,

    /// Generation mode (full or preview)
    #[arg(long, default_value = "full")]
    pub mode: GenerationMode,

    /// Owner id; the book is persisted only when set
    #[arg(long)]
    pub owner: Option<String>,

    /// Theme overriding the template's own
    #[arg(long)]
    pub theme: Option<String>,
}
