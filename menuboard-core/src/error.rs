//! Error types for `Menuboard`
//!
//! Each subsystem owns a `thiserror` enum and a `…Result<T>` alias.
//! [`MenuboardError`] wraps all of them for callers that don't care which
//! layer failed.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{LayoutContext, PresetId, ShapeId, UnitId, UnitType};
use crate::registry::Violation;

/// Errors raised by layout mutations.
///
/// A rejected mutation never changes the layout it was applied to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A config value failed the unit type's schema.
    #[error("invalid value for '{field}': {reason}")]
    Validation {
        /// Field key
        field: String,
        /// Human-readable reason
        reason: String,
    },

    /// The layout is already at its shape's capacity.
    #[error("layout is full ({max} units maximum)")]
    CapacityExceeded {
        /// Capacity of the current shape
        max: usize,
    },

    /// No unit with the given id exists in the layout.
    #[error("unit not found: {0}")]
    UnitNotFound(UnitId),

    /// The unit type has no registered schema.
    #[error("unknown unit type: {0}")]
    UnknownUnitType(UnitType),

    /// A reorder index is outside the unit list.
    #[error("index {index} out of range for {len} units")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Number of units in the layout
        len: usize,
    },

    /// Sizes only apply to free-list (dashboard) layouts.
    #[error("unit sizes are not supported by grid layouts")]
    SizeNotSupported,

    /// The shape belongs to a different layout context.
    #[error("shape '{shape}' is not available for {context} layouts")]
    ShapeNotSupported {
        /// Requested shape
        shape: ShapeId,
        /// Context of the layout
        context: LayoutContext,
    },

    /// Stored layout data could not be loaded.
    #[error("invalid layout snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<Violation> for LayoutError {
    fn from(violation: Violation) -> Self {
        Self::Validation {
            field: violation.field,
            reason: violation.reason,
        }
    }
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors raised by preset repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Local storage could not be read or written.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Stored or received data could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The request never reached the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The repository has no preset with this id.
    #[error("preset not found in repository: {0}")]
    NotFound(PresetId),

    /// The repository refused the operation.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised by the preset store.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The built-in default preset cannot be deleted or overwritten.
    #[error("preset '{0}' is protected")]
    ProtectedResource(PresetId),

    /// No preset with this id (or name) exists.
    #[error("preset not found: {0}")]
    NotFound(String),

    /// The repository call failed; in-memory state is unchanged.
    #[error("failed to persist presets: {0}")]
    Persistence(#[from] RepositoryError),

    /// The preset's layout could not be loaded.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The preset's context doesn't match the session.
    #[error("preset belongs to {preset} layouts, session edits {session} layouts")]
    ContextMismatch {
        /// Context of the preset
        preset: LayoutContext,
        /// Context of the session
        session: LayoutContext,
    },
}

/// Result type for preset store operations
pub type PresetResult<T> = Result<T, PresetError>;

/// Errors raised by the editor session state machine.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A mutation was attempted outside of edit mode.
    #[error("session is not in edit mode")]
    NotEditing,

    /// `begin_edit` was called while already editing.
    #[error("session is already in edit mode")]
    AlreadyEditing,

    /// The mutation itself was rejected.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Saving during apply failed; the working copy is kept.
    #[error(transparent)]
    Preset(#[from] PresetError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised when deploying a rich menu.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Only rich-menu layouts can be deployed.
    #[error("only rich-menu layouts can be deployed (got {0})")]
    UnsupportedContext(LayoutContext),

    /// The layout has no grid to map onto menu areas.
    #[error("layout shape '{0}' is not a grid")]
    NotAGrid(ShapeId),

    /// One or more units are not fully configured.
    #[error("layout is not ready to deploy: {}", format_violations(.0))]
    NotReady(Vec<(UnitId, Violation)>),

    /// The repository rejected the deployment.
    #[error("deployment failed: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Result type for deploy operations
pub type DeployResult<T> = Result<T, DeployError>;

fn format_violations(violations: &[(UnitId, Violation)]) -> String {
    violations
        .iter()
        .map(|(unit, v)| format!("{unit}.{v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read or written.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for [`AppSettings`](crate::config::AppSettings).
    #[error("failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(String),

    /// A setting has an invalid value.
    #[error("invalid setting '{field}': {reason}")]
    Validation {
        /// Setting key
        field: String,
        /// Human-readable reason
        reason: String,
    },

    /// No configuration directory could be determined.
    #[error("could not determine a configuration directory")]
    NoConfigDir,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for `Menuboard` operations
#[derive(Debug, Error)]
pub enum MenuboardError {
    /// Layout mutation error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Repository error
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Preset store error
    #[error(transparent)]
    Preset(#[from] PresetError),

    /// Editor session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Deployment error
    #[error(transparent)]
    Deploy(#[from] DeployError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
