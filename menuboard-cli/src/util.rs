//! Shared utility functions used across command modules.

use std::path::Path;
use std::sync::Arc;

use menuboard_core::config::{AppSettings, ConfigManager};
use menuboard_core::layout::LayoutModel;
use menuboard_core::models::{LayoutContext, UnitId};
use menuboard_core::preset::PresetStore;
use menuboard_core::registry::UnitConfigRegistry;
use menuboard_core::repository::{LayoutRepository, build_repository};
use menuboard_core::session::LayoutEditorSession;
use tokio::runtime::Runtime;

use crate::cli::ContextArg;
use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Builds the single-threaded runtime that drives repository calls.
pub fn create_runtime() -> Result<Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Everything a command needs: settings, the chosen context and the
/// repository selected by the settings.
pub struct Workspace {
    pub manager: ConfigManager,
    pub settings: AppSettings,
    pub context: LayoutContext,
    pub repository: Arc<dyn LayoutRepository>,
}

impl Workspace {
    /// Loads settings and builds the repository.
    pub fn open(config_path: Option<&Path>, context: Option<ContextArg>) -> Result<Self, CliError> {
        let manager = create_config_manager(config_path)?;
        let settings = manager.load_settings()?;
        let context = context.map_or(settings.editor.default_context, LayoutContext::from);
        let repository = build_repository(&settings.backend, manager.config_dir())?;
        tracing::debug!(
            %context,
            backend = repository.backend_id(),
            config_dir = %manager.config_dir().display(),
            "Opened workspace"
        );
        Ok(Self {
            manager,
            settings,
            context,
            repository,
        })
    }

    /// Registry of the workspace context.
    pub fn registry(&self) -> UnitConfigRegistry {
        UnitConfigRegistry::for_context(self.context)
    }

    /// Preset store of the workspace context.
    pub fn preset_store(&self) -> PresetStore {
        PresetStore::new(self.context, Arc::clone(&self.repository))
    }

    /// Session over the applied layout, or the built-in default when none
    /// was saved yet.
    pub fn load_session(&self) -> Result<LayoutEditorSession, CliError> {
        let Some(snapshot) = self.manager.load_applied_layout(self.context)? else {
            return Ok(LayoutEditorSession::for_context(self.context));
        };
        let registry = self.registry();
        let applied = LayoutModel::from_snapshot(snapshot, &registry)?;
        if applied.context() != self.context {
            return Err(CliError::Config(format!(
                "Applied {} layout uses shape '{}'",
                self.context,
                applied.shape_id()
            )));
        }
        Ok(LayoutEditorSession::new(registry, applied))
    }

    /// Writes the session's applied layout.
    pub fn save_session(&self, session: &LayoutEditorSession) -> Result<(), CliError> {
        self.manager
            .save_applied_layout(self.context, &session.applied().snapshot())?;
        Ok(())
    }
}

/// Finds a unit by ID or type tag.
pub fn find_unit(layout: &LayoutModel, id_or_type: &str) -> Result<UnitId, CliError> {
    layout
        .resolve(id_or_type)
        .map(|unit| unit.id.clone())
        .ok_or_else(|| CliError::Layout(format!("No unit '{id_or_type}' in the layout")))
}
