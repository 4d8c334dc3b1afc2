//! Local JSON file repository

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::LayoutRepository;
use crate::deploy::DeployPayload;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{LayoutContext, Preset, PresetDraft, PresetId};

/// File holding every stored preset.
pub const PRESETS_FILE: &str = "presets.json";

/// File holding the deployment history.
pub const DEPLOYMENTS_FILE: &str = "deployments.json";

/// Repository backed by JSON files in a directory.
///
/// Each write rewrites the whole file through a temporary file and a
/// rename, so readers never observe a partial file.
#[derive(Debug)]
pub struct FileRepository {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileRepository {
    /// Creates a repository rooted at `dir`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the presets file.
    #[must_use]
    pub fn presets_path(&self) -> PathBuf {
        self.dir.join(PRESETS_FILE)
    }

    /// Path of the deployments file.
    #[must_use]
    pub fn deployments_path(&self) -> PathBuf {
        self.dir.join(DEPLOYMENTS_FILE)
    }

    /// Deployment history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub async fn deployments(&self) -> RepositoryResult<Vec<DeployPayload>> {
        read_json(&self.deployments_path()).await
    }

    async fn load_presets(&self) -> RepositoryResult<Vec<Preset>> {
        read_json(&self.presets_path()).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> RepositoryResult<Vec<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(RepositoryError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content)
        .map_err(|e| RepositoryError::Serialization(format!("{}: {e}", path.display())))
}

async fn write_json<T: Serialize>(path: &Path, items: &[T]) -> RepositoryResult<()> {
    let io_error = |source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(items)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await.map_err(io_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_error)
}

#[async_trait]
impl LayoutRepository for FileRepository {
    async fn fetch_presets(&self, context: LayoutContext) -> RepositoryResult<Vec<Preset>> {
        let mut presets = self.load_presets().await?;
        presets.retain(|p| p.context == context);
        Ok(presets)
    }

    async fn save_preset(&self, draft: PresetDraft) -> RepositoryResult<Preset> {
        let _guard = self.write_lock.lock().await;
        let mut presets = self.load_presets().await?;

        let existing = draft
            .id
            .as_ref()
            .and_then(|id| presets.iter().position(|p| &p.id == id));
        let preset = match existing {
            Some(index) => {
                let preset = draft.into_preset(Some(&presets[index]));
                presets[index] = preset.clone();
                preset
            }
            None => {
                let preset = draft.into_preset(None);
                presets.push(preset.clone());
                preset
            }
        };

        write_json(&self.presets_path(), &presets).await?;
        tracing::debug!(preset_id = %preset.id, path = %self.presets_path().display(), "Wrote preset");
        Ok(preset)
    }

    async fn delete_preset(&self, id: &PresetId) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut presets = self.load_presets().await?;
        let before = presets.len();
        presets.retain(|p| &p.id != id);
        if presets.len() == before {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        write_json(&self.presets_path(), &presets).await
    }

    async fn deploy(&self, payload: &DeployPayload) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut deployments = self.deployments().await?;
        deployments.push(payload.clone());
        write_json(&self.deployments_path(), &deployments).await
    }

    fn backend_id(&self) -> &'static str {
        "file"
    }

    fn display_name(&self) -> &'static str {
        "Local JSON files"
    }
}
