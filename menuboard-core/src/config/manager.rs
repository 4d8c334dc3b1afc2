//! Configuration directory management.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{LayoutContext, LayoutSnapshot};
use crate::tracing::span_names;
use crate::trace_operation;

use super::AppSettings;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "MENUBOARD_CONFIG_DIR";

/// Name of the settings file inside the configuration directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Loads and saves everything that lives in the configuration directory:
/// `settings.toml` and the applied layout of each context.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Resolves the directory from `MENUBOARD_CONFIG_DIR`, falling back to
    /// the platform config directory (`~/.config/menuboard` on Linux).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if neither is available.
    pub fn new() -> ConfigResult<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::with_config_dir(PathBuf::from(dir)));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join("menuboard")))
    }

    /// Uses an explicit directory.
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of `settings.toml`.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Path of the applied layout file of a context.
    #[must_use]
    pub fn applied_layout_path(&self, context: LayoutContext) -> PathBuf {
        self.config_dir.join(format!("applied-{context}.json"))
    }

    /// Creates the configuration directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the directory can't be created.
    pub fn ensure_config_dir(&self) -> ConfigResult<()> {
        fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }

    /// Loads settings, or defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, isn't valid TOML, or
    /// fails validation.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        let _span = trace_operation!(span_names::CONFIG_LOAD).entered();
        let path = self.settings_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(&path)?;
        let settings: AppSettings = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Writes settings to `settings.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or can't be written.
    pub fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        let _span = trace_operation!(span_names::CONFIG_SAVE).entered();
        settings.validate()?;
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        self.write_atomic(&self.settings_path(), &content)
    }

    /// Loads the applied layout of a context, if one was saved.
    ///
    /// The snapshot is untrusted; callers normalize it through
    /// [`LayoutModel::from_snapshot`](crate::layout::LayoutModel::from_snapshot).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load_applied_layout(
        &self,
        context: LayoutContext,
    ) -> ConfigResult<Option<LayoutSnapshot>> {
        let path = self.applied_layout_path(context);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
    }

    /// Saves the applied layout of a context.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be written.
    pub fn save_applied_layout(
        &self,
        context: LayoutContext,
        snapshot: &LayoutSnapshot,
    ) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        self.write_atomic(&self.applied_layout_path(context), &content)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> ConfigResult<()> {
        self.ensure_config_dir()?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
