//! CLI error types and exit codes.

use menuboard_core::error::{
    ConfigError, DeployError, LayoutError, PresetError, RepositoryError, SessionError,
};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other non-backend errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Backend failure - the preset repository or deploy target could not be
    /// reached or rejected the request
    pub const BACKEND_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected layout edit
    #[error("Layout error: {0}")]
    Layout(String),

    /// Preset error
    #[error("Preset error: {0}")]
    Preset(String),

    /// Deploy rejected before reaching the backend
    #[error("Deploy error: {0}")]
    Deploy(String),

    /// Repository failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<LayoutError> for CliError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err.to_string())
    }
}

impl From<RepositoryError> for CliError {
    fn from(err: RepositoryError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<PresetError> for CliError {
    fn from(err: PresetError) -> Self {
        match err {
            PresetError::Persistence(e) => e.into(),
            PresetError::Layout(e) => e.into(),
            other => Self::Preset(other.to_string()),
        }
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Preset(e) => e.into(),
            SessionError::Layout(e) => e.into(),
            other => Self::Layout(other.to_string()),
        }
    }
}

impl From<DeployError> for CliError {
    fn from(err: DeployError) -> Self {
        match err {
            DeployError::Persistence(e) => e.into(),
            other => Self::Deploy(other.to_string()),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, validation, preset, IO)
    /// - 2: Backend failure (repository or deploy target)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Backend(_) => exit_codes::BACKEND_FAILURE,
            Self::Config(_)
            | Self::Layout(_)
            | Self::Preset(_)
            | Self::Deploy(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
