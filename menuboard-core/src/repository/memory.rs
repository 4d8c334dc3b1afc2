//! In-memory mock repository

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::LayoutRepository;
use crate::deploy::DeployPayload;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{LayoutContext, Preset, PresetDraft, PresetId};

/// Repository that keeps everything in process memory.
///
/// Used in local development mode and throughout the tests. Writes can be
/// made to fail on demand with [`Self::fail_next_writes`].
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    presets: RwLock<Vec<Preset>>,
    deployments: RwLock<Vec<DeployPayload>>,
    failing_writes: AtomicUsize,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `presets`.
    #[must_use]
    pub fn with_presets(presets: Vec<Preset>) -> Self {
        Self {
            presets: RwLock::new(presets),
            ..Self::default()
        }
    }

    /// Makes the next `count` write operations fail with
    /// `RepositoryError::Unavailable`.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Payloads deployed so far, oldest first.
    pub async fn deployments(&self) -> Vec<DeployPayload> {
        self.deployments.read().await.clone()
    }

    /// Number of stored presets across all contexts.
    pub async fn len(&self) -> usize {
        self.presets.read().await.len()
    }

    /// Returns true if no presets are stored.
    pub async fn is_empty(&self) -> bool {
        self.presets.read().await.is_empty()
    }

    fn check_write(&self) -> RepositoryResult<()> {
        let armed = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if armed {
            return Err(RepositoryError::Unavailable(
                "simulated write failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LayoutRepository for InMemoryRepository {
    async fn fetch_presets(&self, context: LayoutContext) -> RepositoryResult<Vec<Preset>> {
        let presets = self.presets.read().await;
        Ok(presets
            .iter()
            .filter(|p| p.context == context)
            .cloned()
            .collect())
    }

    async fn save_preset(&self, draft: PresetDraft) -> RepositoryResult<Preset> {
        self.check_write()?;
        let mut presets = self.presets.write().await;

        let existing = draft
            .id
            .as_ref()
            .and_then(|id| presets.iter().position(|p| &p.id == id));
        match existing {
            Some(index) => {
                let preset = draft.into_preset(Some(&presets[index]));
                presets[index] = preset.clone();
                Ok(preset)
            }
            None => {
                let preset = draft.into_preset(None);
                presets.push(preset.clone());
                Ok(preset)
            }
        }
    }

    async fn delete_preset(&self, id: &PresetId) -> RepositoryResult<()> {
        self.check_write()?;
        let mut presets = self.presets.write().await;
        let index = presets
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        presets.remove(index);
        Ok(())
    }

    async fn deploy(&self, payload: &DeployPayload) -> RepositoryResult<()> {
        self.check_write()?;
        self.deployments.write().await.push(payload.clone());
        Ok(())
    }

    fn backend_id(&self) -> &'static str {
        "memory"
    }

    fn display_name(&self) -> &'static str {
        "In-memory (development)"
    }
}
