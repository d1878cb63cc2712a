//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyloom binary.

mod commands;
mod run;
mod validate;

pub use commands::{Cli, Commands, RunArgs};
pub use run::run_book;
pub use validate::{load_template, validate_template};
