//! Configuration management for `Menuboard`
//!
//! [`AppSettings`] is stored as TOML in the configuration directory, next
//! to the applied layout of each context. [`ConfigManager`] owns the paths.

mod manager;
mod settings;

pub use manager::{CONFIG_DIR_ENV, ConfigManager, SETTINGS_FILE};
pub use settings::{
    AppSettings, BackendMode, BackendSettings, DEFAULT_TIMEOUT_SECS, EditorSettings,
    LoggingSettings,
};
