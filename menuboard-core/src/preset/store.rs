//! Preset store of one layout context.

use std::sync::Arc;

use tracing::Instrument;

use crate::error::{LayoutError, PresetError, PresetResult, RepositoryError};
use crate::layout::LayoutModel;
use crate::models::{LayoutContext, Preset, PresetDraft, PresetId};
use crate::registry::UnitConfigRegistry;
use crate::repository::LayoutRepository;
use crate::session::LayoutEditorSession;
use crate::tracing::span_names;
use crate::trace_operation;

use super::defaults::default_preset;

/// Named layout snapshots of one context, backed by a repository.
///
/// The built-in default preset is always listed first and is protected:
/// saving over its name and deleting it both fail with
/// `PresetError::ProtectedResource`.
pub struct PresetStore {
    context: LayoutContext,
    registry: UnitConfigRegistry,
    repository: Arc<dyn LayoutRepository>,
    default: Preset,
}

impl std::fmt::Debug for PresetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetStore")
            .field("context", &self.context)
            .field("backend", &self.repository.backend_id())
            .field("default", &self.default.id)
            .finish_non_exhaustive()
    }
}

impl PresetStore {
    /// Creates a store for `context` with the built-in registry.
    #[must_use]
    pub fn new(context: LayoutContext, repository: Arc<dyn LayoutRepository>) -> Self {
        Self::with_registry(UnitConfigRegistry::for_context(context), context, repository)
    }

    /// Creates a store with a custom registry.
    #[must_use]
    pub fn with_registry(
        registry: UnitConfigRegistry,
        context: LayoutContext,
        repository: Arc<dyn LayoutRepository>,
    ) -> Self {
        let default = default_preset(context, &registry);
        Self {
            context,
            registry,
            repository,
            default,
        }
    }

    /// Context of the store.
    #[must_use]
    pub const fn context(&self) -> LayoutContext {
        self.context
    }

    /// The built-in default preset.
    #[must_use]
    pub const fn default_preset(&self) -> &Preset {
        &self.default
    }

    /// Underlying repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn LayoutRepository> {
        &self.repository
    }

    fn ensure_context(&self, context: LayoutContext) -> PresetResult<()> {
        if context == self.context {
            Ok(())
        } else {
            Err(PresetError::ContextMismatch {
                preset: self.context,
                session: context,
            })
        }
    }

    /// All presets: the default first, then the stored ones.
    ///
    /// Stored entries claiming to be a default, or reusing the default's id,
    /// are skipped so exactly one default is listed.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::Persistence` if the repository fails.
    pub async fn list(&self) -> PresetResult<Vec<Preset>> {
        let span = trace_operation!(span_names::PRESET_LIST, context = %self.context);
        let stored = self
            .repository
            .fetch_presets(self.context)
            .instrument(span)
            .await?;

        let mut presets = Vec::with_capacity(stored.len() + 1);
        presets.push(self.default.clone());
        presets.extend(stored.into_iter().filter(|p| {
            if p.context != self.context {
                tracing::warn!(
                    preset_id = %p.id,
                    preset_context = %p.context,
                    "Ignoring stored preset of another context"
                );
                false
            } else if p.is_default || p.id == self.default.id {
                tracing::warn!(preset_id = %p.id, "Ignoring stored preset that claims to be the default");
                false
            } else {
                true
            }
        }));
        Ok(presets)
    }

    /// Finds a preset by id or case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::NotFound` if nothing matches, or
    /// `PresetError::Persistence` if the repository fails.
    pub async fn find(&self, id_or_name: &str) -> PresetResult<Preset> {
        let presets = self.list().await?;
        presets
            .iter()
            .find(|p| p.id.as_str() == id_or_name)
            .or_else(|| presets.iter().find(|p| p.matches(id_or_name)))
            .cloned()
            .ok_or_else(|| PresetError::NotFound(id_or_name.to_string()))
    }

    /// Saves `layout` under `name`.
    ///
    /// A stored preset with the same name (case-insensitive) is overwritten
    /// and keeps its id; otherwise a new preset is created. Without a
    /// `description` an overwrite keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::ProtectedResource` for the default's name or
    /// id, `PresetError::ContextMismatch` for a layout of another context,
    /// `PresetError::Layout` for a blank name, and
    /// `PresetError::Persistence` if the repository fails.
    pub async fn save(
        &self,
        name: &str,
        description: Option<&str>,
        layout: &LayoutModel,
    ) -> PresetResult<Preset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LayoutError::Validation {
                field: "name".to_string(),
                reason: "is required".to_string(),
            }
            .into());
        }
        self.ensure_context(layout.context())?;
        if self.default.matches(name) {
            return Err(PresetError::ProtectedResource(self.default.id.clone()));
        }

        let span = trace_operation!(span_names::PRESET_SAVE, preset_name = %name);
        async {
            let existing = self
                .list()
                .await?
                .into_iter()
                .skip(1)
                .find(|p| p.name.eq_ignore_ascii_case(name));

            let description = match (description, &existing) {
                (Some(description), _) => description.to_string(),
                (None, Some(existing)) => existing.description.clone(),
                (None, None) => String::new(),
            };
            let mut draft = PresetDraft::new(name, self.context, layout.snapshot())
                .with_description(description);
            if let Some(existing) = &existing {
                draft = draft.with_id(existing.id.clone());
            }

            let preset = self.repository.save_preset(draft).await?;
            tracing::info!(
                preset_id = %preset.id,
                overwritten = existing.is_some(),
                "Saved preset"
            );
            Ok::<_, PresetError>(preset)
        }
        .instrument(span)
        .await
    }

    /// Loads a preset into the session's working copy, entering edit mode
    /// if the session is idle. The applied layout is untouched.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::NotFound` for unknown presets,
    /// `PresetError::ContextMismatch` if the session edits another context,
    /// and `PresetError::Layout` if the stored layout is invalid.
    pub async fn apply(
        &self,
        session: &mut LayoutEditorSession,
        id_or_name: &str,
    ) -> PresetResult<Preset> {
        self.ensure_context(session.context())?;
        let preset = self.find(id_or_name).await?;
        let layout = self.load_layout(&preset)?;
        session.load_working(layout)?;
        tracing::debug!(preset_id = %preset.id, "Loaded preset into working copy");
        Ok(preset)
    }

    /// Loads the built-in default into the session's working copy.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::ContextMismatch` if the session edits another
    /// context.
    pub fn reset_to_default(&self, session: &mut LayoutEditorSession) -> PresetResult<()> {
        self.ensure_context(session.context())?;
        let layout = self.load_layout(&self.default)?;
        session.load_working(layout)?;
        Ok(())
    }

    /// Deletes a stored preset.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::ProtectedResource` for the default,
    /// `PresetError::NotFound` for unknown ids and ids of another context,
    /// and `PresetError::Persistence` if the repository fails.
    pub async fn delete(&self, id: &PresetId) -> PresetResult<()> {
        if id == &self.default.id {
            return Err(PresetError::ProtectedResource(id.clone()));
        }
        if !self.list().await?.iter().any(|p| &p.id == id) {
            return Err(PresetError::NotFound(id.to_string()));
        }
        let span = trace_operation!(span_names::PRESET_DELETE, preset_id = %id);
        match self.repository.delete_preset(id).instrument(span).await {
            Ok(()) => {
                tracing::info!(preset_id = %id, "Deleted preset");
                Ok(())
            }
            Err(RepositoryError::NotFound(id)) => Err(PresetError::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Normalizes a preset's stored layout.
    ///
    /// # Errors
    ///
    /// Returns `PresetError::ContextMismatch` or `PresetError::Layout` if
    /// the stored data doesn't fit this store.
    pub fn load_layout(&self, preset: &Preset) -> PresetResult<LayoutModel> {
        self.ensure_context(preset.snapshot.shape_id.context())?;
        Ok(LayoutModel::from_snapshot(
            preset.snapshot.clone(),
            &self.registry,
        )?)
    }
}
