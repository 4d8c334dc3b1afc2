//! Application settings stored in `settings.toml`.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ConfigError, ConfigResult};
use crate::models::LayoutContext;
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// Default request timeout of the remote backend, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Where presets live
    pub backend: BackendSettings,
    /// Log output
    pub logging: LoggingSettings,
    /// Editor defaults
    pub editor: EditorSettings,
}

impl AppSettings {
    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        self.backend.validate()
    }
}

/// Which repository implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// In-process mock, nothing survives the process
    Memory,
    /// JSON files in the config directory
    #[default]
    File,
    /// Dashboard REST API
    Remote,
}

impl BackendMode {
    /// Settings value of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Remote => "remote",
        }
    }
}

impl std::fmt::Display for BackendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository selection and remote connection details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Repository implementation
    pub mode: BackendMode,
    /// Base URL of the REST API (remote mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Bearer token for the REST API
    #[serde(
        serialize_with = "serialize_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_token: Option<SecretString>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: None,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn serialize_token<S: Serializer>(
    token: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match token {
        Some(token) => serializer.serialize_str(token.expose_secret()),
        None => serializer.serialize_none(),
    }
}

impl BackendSettings {
    /// Checks the remote connection settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for a zero timeout, or for remote
    /// mode without an http(s) base URL.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "backend.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.mode == BackendMode::Remote {
            let url = self.base_url.as_deref().unwrap_or_default().trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation {
                    field: "backend.base_url".to_string(),
                    reason: "remote mode needs an http(s) URL".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level used when no `-v` flag is given
    pub level: TracingLevel,
    /// Log file; stderr when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Tracing configuration for these settings, raised by `verbosity`.
    #[must_use]
    pub fn tracing_config(&self, verbosity: u8) -> TracingConfig {
        let output = self
            .file
            .clone()
            .map_or(TracingOutput::Stderr, TracingOutput::File);
        TracingConfig::new()
            .with_level(TracingLevel::from_verbosity(verbosity, self.level))
            .with_output(output)
    }
}

/// Editor defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Context used when none is given on the command line
    pub default_context: LayoutContext,
}
