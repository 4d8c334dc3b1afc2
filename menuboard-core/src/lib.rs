//! `Menuboard` Core Library
//!
//! Placement engine behind the restaurant dashboard: a bounded, ordered
//! collection of typed, configurable placement units inside a container
//! shape. The same engine arranges dashboard sections (a free list of
//! resizable sections) and rich-menu buttons (a fixed grid).
//!
//! # Crate Structure
//!
//! - [`models`] - Placement units, shapes, presets
//! - [`registry`] - Per-unit-type config schemas and validation
//! - [`layout`] - Layout model and the two reorder algorithms
//! - [`session`] - Staged edit/apply/cancel workflow
//! - [`preset`] - Named presets with a protected built-in default
//! - [`repository`] - Storage contract and its implementations
//! - [`deploy`] - Rich-menu publishing
//! - [`config`] - Settings and the configuration directory
//! - [`tracing`] - Structured logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod deploy;
pub mod error;
pub mod layout;
pub mod models;
pub mod preset;
pub mod registry;
pub mod repository;
pub mod session;
pub mod tracing;

pub use config::{AppSettings, BackendMode, BackendSettings, ConfigManager};
pub use deploy::{DeployPayload, DeployPlan, Deployer, MenuArea};
pub use error::{
    ConfigError, ConfigResult, DeployError, DeployResult, LayoutError, LayoutResult,
    MenuboardError, PresetError, PresetResult, RepositoryError, RepositoryResult, SessionError,
    SessionResult,
};
pub use layout::{AddOutcome, Direction, LayoutModel, ShapeChange};
pub use models::{
    ConfigValue, ContainerShape, LayoutContext, LayoutSnapshot, PlacementUnit, Preset,
    PresetDraft, PresetId, ShapeId, UnitId, UnitSize, UnitType,
};
pub use preset::PresetStore;
pub use registry::{FieldDescriptor, FieldKind, UnitConfigRegistry, UnitSchema, Violation};
pub use repository::{
    FileRepository, HttpRepository, InMemoryRepository, LayoutRepository, build_repository,
};
pub use session::{EditState, LayoutEditorSession};
