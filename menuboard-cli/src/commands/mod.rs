//! Command handler modules for the CLI.

mod completions;
mod config;
mod deploy;
mod layout;
mod preset;
mod types;

use std::path::Path;

use crate::cli::{Commands, ContextArg};
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(
    config_path: Option<&Path>,
    context: Option<ContextArg>,
    command: Commands,
) -> Result<(), CliError> {
    match command {
        Commands::Types => types::cmd_types(config_path, context),
        Commands::Layout(subcmd) => layout::cmd_layout(config_path, context, subcmd),
        Commands::Preset(subcmd) => preset::cmd_preset(config_path, context, subcmd),
        Commands::Deploy { dry_run } => deploy::cmd_deploy(config_path, context, dry_run),
        Commands::Config(subcmd) => config::cmd_config(config_path, subcmd),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
