//! Layout editor session.

use tracing::Instrument;

use crate::error::{LayoutError, LayoutResult, SessionError, SessionResult};
use crate::layout::{AddOutcome, Direction, LayoutModel};
use crate::models::{
    ConfigValue, LayoutContext, PlacementUnit, Preset, ShapeId, UnitId, UnitSize, UnitType,
};
use crate::preset::{PresetStore, default_layout};
use crate::registry::UnitConfigRegistry;
use crate::tracing::span_names;
use crate::trace_operation;

/// Edit state of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    /// Showing the applied layout; mutations are rejected.
    Idle,
    /// A working copy receives all mutations.
    Editing {
        /// Staged layout
        working: LayoutModel,
    },
}

/// Staged edit/apply/cancel workflow over one context's layout.
///
/// The applied layout is observable at all times and only changes on
/// [`Self::apply`]. Every mutation replaces the working copy with the
/// result of a pure [`LayoutModel`] transform, so a rejected mutation
/// leaves it untouched.
///
/// # Example
///
/// ```
/// use menuboard_core::models::{LayoutContext, UnitType};
/// use menuboard_core::session::LayoutEditorSession;
///
/// let mut session = LayoutEditorSession::for_context(LayoutContext::RichMenu);
/// let before = session.applied().clone();
///
/// session.begin_edit().unwrap();
/// session.add_unit(&UnitType::from("coupon")).unwrap_err(); // default 2x2 grid is full
/// session.add_unit(&UnitType::from("chat")).unwrap(); // toggles chat off
/// assert!(session.is_dirty());
///
/// session.cancel();
/// assert_eq!(session.applied(), &before);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEditorSession {
    registry: UnitConfigRegistry,
    applied: LayoutModel,
    state: EditState,
}

impl LayoutEditorSession {
    /// Creates an idle session showing `applied`.
    #[must_use]
    pub const fn new(registry: UnitConfigRegistry, applied: LayoutModel) -> Self {
        Self {
            registry,
            applied,
            state: EditState::Idle,
        }
    }

    /// Creates an idle session with the built-in registry and default
    /// layout of `context`.
    #[must_use]
    pub fn for_context(context: LayoutContext) -> Self {
        let registry = UnitConfigRegistry::for_context(context);
        let applied = default_layout(context, &registry);
        Self::new(registry, applied)
    }

    /// Context the session edits.
    #[must_use]
    pub const fn context(&self) -> LayoutContext {
        self.applied.context()
    }

    /// Unit schemas used for validation.
    #[must_use]
    pub const fn registry(&self) -> &UnitConfigRegistry {
        &self.registry
    }

    /// Last committed layout.
    #[must_use]
    pub const fn applied(&self) -> &LayoutModel {
        &self.applied
    }

    /// Working copy, if editing.
    #[must_use]
    pub const fn working(&self) -> Option<&LayoutModel> {
        match &self.state {
            EditState::Editing { working } => Some(working),
            EditState::Idle => None,
        }
    }

    /// Working copy when editing, applied layout otherwise.
    #[must_use]
    pub fn current(&self) -> &LayoutModel {
        self.working().unwrap_or(&self.applied)
    }

    /// Current edit state.
    #[must_use]
    pub const fn state(&self) -> &EditState {
        &self.state
    }

    /// Returns true if a working copy exists.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Returns true if the working copy differs from the applied layout.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.working().is_some_and(|working| working != &self.applied)
    }

    /// Enters edit mode with a copy of the applied layout.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyEditing` if already editing.
    pub fn begin_edit(&mut self) -> SessionResult<()> {
        if self.is_editing() {
            return Err(SessionError::AlreadyEditing);
        }
        self.state = EditState::Editing {
            working: self.applied.clone(),
        };
        tracing::debug!(context = %self.context(), "Began editing");
        Ok(())
    }

    /// Replaces the working copy, entering edit mode if idle.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::ShapeNotSupported` if `layout` belongs to the
    /// other context.
    pub fn load_working(&mut self, layout: LayoutModel) -> LayoutResult<()> {
        if layout.context() != self.context() {
            return Err(LayoutError::ShapeNotSupported {
                shape: layout.shape_id(),
                context: self.context(),
            });
        }
        self.state = EditState::Editing { working: layout };
        Ok(())
    }

    /// Discards the working copy. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.is_editing();
        self.state = EditState::Idle;
        if was_editing {
            tracing::debug!(context = %self.context(), "Discarded working copy");
        }
        was_editing
    }

    /// Commits the working copy.
    ///
    /// With `persist`, the working copy is first saved as a preset under the
    /// given name. If that save fails the session stays in edit mode with
    /// the working copy intact and the applied layout unchanged.
    ///
    /// Returns the saved preset, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or
    /// `SessionError::Preset` when persisting fails.
    pub async fn apply(
        &mut self,
        persist: Option<(&PresetStore, &str)>,
    ) -> SessionResult<Option<Preset>> {
        let EditState::Editing { working } = &self.state else {
            return Err(SessionError::NotEditing);
        };
        let span = trace_operation!(
            span_names::SESSION_APPLY,
            context = %self.context(),
            persist = persist.is_some()
        );

        let saved = match persist {
            Some((store, name)) => Some(
                store
                    .save(name, None, working)
                    .instrument(span.clone())
                    .await?,
            ),
            None => None,
        };

        if let EditState::Editing { working } =
            std::mem::replace(&mut self.state, EditState::Idle)
        {
            self.applied = working;
        }
        span.in_scope(|| {
            tracing::info!(units = self.applied.len(), "Applied layout");
        });
        Ok(saved)
    }

    /// Saves the working copy (or the applied layout when idle) as a preset
    /// without applying it. Without a `description` an overwritten preset
    /// keeps its own.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Preset` if the store rejects the save.
    pub async fn save_as_preset(
        &self,
        store: &PresetStore,
        name: &str,
        description: Option<&str>,
    ) -> SessionResult<Preset> {
        Ok(store.save(name, description, self.current()).await?)
    }

    fn editing(&self) -> SessionResult<&LayoutModel> {
        self.working().ok_or(SessionError::NotEditing)
    }

    fn commit(&mut self, layout: LayoutModel) {
        self.state = EditState::Editing { working: layout };
    }

    /// Adds a unit of `unit_type`, or removes the existing one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn add_unit(&mut self, unit_type: &UnitType) -> SessionResult<AddOutcome> {
        let (layout, outcome) = self.editing()?.add_unit(&self.registry, unit_type)?;
        tracing::debug!(unit_type = %unit_type, removed = outcome.is_removed(), "Toggled unit type");
        self.commit(layout);
        Ok(outcome)
    }

    /// Removes a unit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn remove_unit(&mut self, id: &UnitId) -> SessionResult<PlacementUnit> {
        let (layout, removed) = self.editing()?.remove_unit(id)?;
        tracing::debug!(unit_id = %id, "Removed unit");
        self.commit(layout);
        Ok(removed)
    }

    /// Flips a unit's visibility.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn toggle_visible(&mut self, id: &UnitId) -> SessionResult<()> {
        let layout = self.editing()?.toggle_visible(id)?;
        tracing::debug!(unit_id = %id, "Toggled visibility");
        self.commit(layout);
        Ok(())
    }

    /// Sets one validated config field of a unit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn set_unit_config(
        &mut self,
        id: &UnitId,
        field: &str,
        value: ConfigValue,
    ) -> SessionResult<()> {
        let layout = self
            .editing()?
            .set_unit_config(&self.registry, id, field, value)?;
        tracing::debug!(unit_id = %id, field, "Updated unit config");
        self.commit(layout);
        Ok(())
    }

    /// Resizes a dashboard section.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn set_unit_size(&mut self, id: &UnitId, size: UnitSize) -> SessionResult<()> {
        let layout = self.editing()?.set_unit_size(id, size)?;
        tracing::debug!(unit_id = %id, size = %size, "Resized unit");
        self.commit(layout);
        Ok(())
    }

    /// Switches shape and returns the units that no longer fit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn change_shape(&mut self, shape_id: ShapeId) -> SessionResult<Vec<PlacementUnit>> {
        let change = self.editing()?.change_shape(shape_id)?;
        if change.truncated() {
            tracing::warn!(
                shape = %shape_id,
                dropped = change.dropped.len(),
                "Shape change dropped trailing units"
            );
        }
        self.commit(change.layout);
        Ok(change.dropped)
    }

    /// Swaps a unit with its neighbor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn move_adjacent(&mut self, id: &UnitId, direction: Direction) -> SessionResult<()> {
        let layout = self.editing()?.move_adjacent(id, direction)?;
        tracing::debug!(unit_id = %id, direction = %direction, "Moved unit");
        self.commit(layout);
        Ok(())
    }

    /// Moves the unit at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotEditing` when idle, or the layout error.
    pub fn move_to_index(&mut self, from: usize, to: usize) -> SessionResult<()> {
        let layout = self.editing()?.move_to_index(from, to)?;
        tracing::debug!(from, to, "Moved unit to index");
        self.commit(layout);
        Ok(())
    }
}
