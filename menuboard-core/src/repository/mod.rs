//! Preset repositories
//!
//! The [`LayoutRepository`] trait is the only storage seam of the crate.
//! Exactly one implementation is chosen at startup by [`build_repository`];
//! nothing downstream branches on which one it got.
//!
//! - [`InMemoryRepository`]: mock backend for local development and tests
//! - [`FileRepository`]: JSON files in the config directory
//! - [`HttpRepository`]: the dashboard's REST backend

mod file;
mod http;
mod memory;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

pub use file::FileRepository;
pub use http::HttpRepository;
pub use memory::InMemoryRepository;

use crate::config::{BackendMode, BackendSettings};
use crate::deploy::DeployPayload;
use crate::error::RepositoryResult;
use crate::models::{LayoutContext, Preset, PresetDraft, PresetId};

/// Storage contract for presets and rich-menu deployments.
///
/// All methods may fail with a [`RepositoryError`](crate::error::RepositoryError);
/// callers keep their in-memory state unchanged when they do.
#[async_trait]
pub trait LayoutRepository: Send + Sync {
    /// Fetches the stored presets of one context.
    async fn fetch_presets(&self, context: LayoutContext) -> RepositoryResult<Vec<Preset>>;

    /// Creates or overwrites a preset.
    ///
    /// Drafts without an id are created and get a fresh one; drafts with an
    /// id overwrite that preset. Returns the stored preset.
    async fn save_preset(&self, draft: PresetDraft) -> RepositoryResult<Preset>;

    /// Deletes a preset.
    ///
    /// Fails with `RepositoryError::NotFound` for unknown ids.
    async fn delete_preset(&self, id: &PresetId) -> RepositoryResult<()>;

    /// Publishes a rich-menu layout.
    async fn deploy(&self, payload: &DeployPayload) -> RepositoryResult<()>;

    /// Stable identifier of the implementation.
    fn backend_id(&self) -> &'static str;

    /// Human-readable name of the implementation.
    fn display_name(&self) -> &'static str;
}

/// Builds the repository selected by `settings`.
///
/// `config_dir` is where the file backend keeps its JSON files.
///
/// # Errors
///
/// Returns `RepositoryError::Unavailable` if the remote backend is selected
/// without a base URL, or `RepositoryError::Transport` if its HTTP client
/// can't be built.
pub fn build_repository(
    settings: &BackendSettings,
    config_dir: &Path,
) -> RepositoryResult<Arc<dyn LayoutRepository>> {
    let repository: Arc<dyn LayoutRepository> = match settings.mode {
        BackendMode::Memory => Arc::new(InMemoryRepository::new()),
        BackendMode::File => Arc::new(FileRepository::new(config_dir)),
        BackendMode::Remote => Arc::new(HttpRepository::from_settings(settings)?),
    };
    tracing::debug!(
        backend = repository.backend_id(),
        "Selected preset repository"
    );
    Ok(repository)
}
