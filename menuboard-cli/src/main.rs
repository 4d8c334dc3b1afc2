//! `Menuboard` CLI - Command-line interface for the `Menuboard` placement
//! engine
//!
//! Provides commands for editing the applied dashboard and rich-menu
//! layouts, managing presets, deploying the rich menu and managing
//! settings.

mod cli;
mod commands;
mod error;
mod format;
mod util;

use clap::Parser;
use cli::Cli;
use menuboard_core::config::AppSettings;
use menuboard_core::tracing::init_tracing;

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    if !cli.quiet {
        init_logging(config_path, cli.verbose);
    }

    let result = commands::dispatch(config_path, cli.context, cli.command);

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Sets up logging from the settings file, raised by `-v` flags. Broken
/// settings are reported by the command itself, so defaults are used here.
fn init_logging(config_path: Option<&std::path::Path>, verbose: u8) {
    let settings = util::create_config_manager(config_path)
        .and_then(|manager| Ok(manager.load_settings()?))
        .unwrap_or_else(|_| AppSettings::default());
    let config = settings.logging.tracing_config(verbose);
    if let Err(e) = init_tracing(&config) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }
}
