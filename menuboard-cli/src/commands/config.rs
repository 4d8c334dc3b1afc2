//! Settings commands.

use std::path::Path;

use menuboard_core::config::{AppSettings, ConfigManager};
use secrecy::SecretString;

use crate::cli::ConfigCommands;
use crate::error::CliError;
use crate::util::create_config_manager;

/// Config command handler
pub fn cmd_config(config_path: Option<&Path>, subcmd: ConfigCommands) -> Result<(), CliError> {
    let manager = create_config_manager(config_path)?;
    match subcmd {
        ConfigCommands::Show => {
            let settings = manager.load_settings()?;
            print_settings(&manager, &settings);
        }
        ConfigCommands::Init {
            backend,
            base_url,
            api_token,
            timeout,
            default_context,
        } => {
            let mut settings = manager.load_settings()?;
            if let Some(backend) = backend {
                settings.backend.mode = backend.into();
            }
            if let Some(url) = base_url {
                settings.backend.base_url = Some(url.trim().to_string());
            }
            if let Some(token) = api_token {
                settings.backend.api_token = Some(SecretString::from(token));
            }
            if let Some(timeout) = timeout {
                settings.backend.timeout_secs = timeout;
            }
            if let Some(context) = default_context {
                settings.editor.default_context = context.into();
            }
            manager.save_settings(&settings)?;
            println!("Wrote {}", manager.settings_path().display());
        }
    }
    Ok(())
}

fn print_settings(manager: &ConfigManager, settings: &AppSettings) {
    let settings_path = manager.settings_path();
    let source = if settings_path.exists() {
        settings_path.display().to_string()
    } else {
        "(defaults, no settings file)".to_string()
    };

    println!("Configuration:");
    println!("  Directory: {}", manager.config_dir().display());
    println!("  Settings:  {source}");
    println!("Backend:");
    println!("  Mode:      {}", settings.backend.mode);
    if let Some(ref url) = settings.backend.base_url {
        println!("  Base URL:  {url}");
    }
    let token = if settings.backend.api_token.is_some() {
        "[set]"
    } else {
        "(none)"
    };
    println!("  Token:     {token}");
    println!("  Timeout:   {}s", settings.backend.timeout_secs);
    println!("Logging:");
    println!("  Level:     {}", settings.logging.level);
    if let Some(ref file) = settings.logging.file {
        println!("  File:      {}", file.display());
    }
    println!("Editor:");
    println!("  Context:   {}", settings.editor.default_context);
}
