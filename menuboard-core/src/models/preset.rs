//! Preset model: a named, persisted snapshot of a layout.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shape::{LayoutContext, ShapeId};
use super::unit::PlacementUnit;

/// Identifier of a stored preset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(String);

impl PresetId {
    /// Creates a new random preset ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PresetId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for PresetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PresetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape and units of a layout as stored on the wire.
///
/// Snapshots coming from storage are untrusted; turn them into a
/// [`LayoutModel`](crate::layout::LayoutModel) with
/// [`LayoutModel::from_snapshot`](crate::layout::LayoutModel::from_snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// Container shape
    pub shape_id: ShapeId,
    /// Units in order
    #[serde(default)]
    pub units: Vec<PlacementUnit>,
}

/// A stored preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Store-assigned identifier
    pub id: PresetId,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
    /// Editor the preset belongs to
    pub context: LayoutContext,
    /// Shape and units
    #[serde(flatten)]
    pub snapshot: LayoutSnapshot,
    /// Whether this is the built-in default
    #[serde(default)]
    pub is_default: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Preset {
    /// Returns true if `query` matches the preset's id or (case-insensitively)
    /// its name.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.id.as_str() == query || self.name.eq_ignore_ascii_case(query.trim())
    }

    /// Updates the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A preset about to be saved.
///
/// `id` is `None` for new presets; the repository assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDraft {
    /// Existing ID when overwriting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PresetId>,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
    /// Editor the preset belongs to
    pub context: LayoutContext,
    /// Shape and units
    #[serde(flatten)]
    pub snapshot: LayoutSnapshot,
}

impl PresetDraft {
    /// Creates a draft for a new preset.
    #[must_use]
    pub fn new(name: impl Into<String>, context: LayoutContext, snapshot: LayoutSnapshot) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            context,
            snapshot,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Targets an existing preset for overwrite.
    #[must_use]
    pub fn with_id(mut self, id: PresetId) -> Self {
        self.id = Some(id);
        self
    }

    /// Turns the draft into a stored preset.
    ///
    /// `existing` carries the creation time when overwriting. Used by
    /// repositories that assign ids locally.
    #[must_use]
    pub fn into_preset(self, existing: Option<&Preset>) -> Preset {
        let now = Utc::now();
        Preset {
            id: self.id.unwrap_or_default(),
            name: self.name,
            description: self.description,
            context: self.context,
            snapshot: self.snapshot,
            is_default: false,
            created_at: existing.map_or(now, |p| p.created_at),
            updated_at: now,
        }
    }
}
