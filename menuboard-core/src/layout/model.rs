//! Layout model: the ordered units of one layout plus its container shape.
//!
//! Every mutation is a pure transform: it borrows the current model and
//! returns a new one, leaving the original untouched. A rejected mutation
//! therefore can't leave a half-applied layout behind, and the editor
//! session can swap its working copy only on success.
//!
//! # Example
//!
//! ```
//! use menuboard_core::layout::{AddOutcome, LayoutModel};
//! use menuboard_core::models::{ShapeId, UnitType};
//! use menuboard_core::registry::UnitConfigRegistry;
//!
//! let registry = UnitConfigRegistry::rich_menu();
//! let layout = LayoutModel::empty(ShapeId::Grid1x2);
//!
//! let (layout, outcome) = layout.add_unit(&registry, &UnitType::from("chat")).unwrap();
//! assert!(matches!(outcome, AddOutcome::Added(_)));
//! assert_eq!(layout.len(), 1);
//!
//! // Adding the same type again toggles it off.
//! let (layout, outcome) = layout.add_unit(&registry, &UnitType::from("chat")).unwrap();
//! assert!(matches!(outcome, AddOutcome::Removed(_)));
//! assert!(layout.is_empty());
//! ```

use std::collections::HashSet;

use serde::Serialize;

use super::reorder::{self, Direction};
use crate::error::{LayoutError, LayoutResult};
use crate::models::{
    ConfigValue, ContainerShape, LayoutContext, LayoutSnapshot, PlacementUnit, ShapeId, UnitId,
    UnitSize, UnitType,
};
use crate::registry::UnitConfigRegistry;

/// Result of [`LayoutModel::add_unit`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// A new unit was appended.
    Added(UnitId),
    /// A unit of that type already existed and was removed instead.
    Removed(PlacementUnit),
}

impl AddOutcome {
    /// Returns true if the call removed an existing unit.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// Result of [`LayoutModel::change_shape`].
///
/// Shrinking keeps the lowest-order units; `dropped` holds the rest, in
/// order, and must be surfaced to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeChange {
    /// Layout in the new shape
    pub layout: LayoutModel,
    /// Units that no longer fit
    pub dropped: Vec<PlacementUnit>,
}

impl ShapeChange {
    /// Returns true if any unit was dropped.
    #[must_use]
    pub fn truncated(&self) -> bool {
        !self.dropped.is_empty()
    }
}

/// Ordered placement units inside a container shape.
///
/// Invariants, checked by [`LayoutModel::check_invariants`]:
/// - orders are exactly `0..len`, matching vector position
/// - `len <= shape.max_units`
/// - unit types and unit ids are unique
/// - free-list units carry a size, grid units don't
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutModel {
    shape_id: ShapeId,
    units: Vec<PlacementUnit>,
}

impl LayoutModel {
    /// Creates an empty layout.
    #[must_use]
    pub const fn empty(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            units: Vec::new(),
        }
    }

    /// Builds a layout from units the caller already keeps consistent.
    pub(crate) const fn from_units(shape_id: ShapeId, units: Vec<PlacementUnit>) -> Self {
        Self { shape_id, units }
    }

    /// Loads a layout from untrusted stored data.
    ///
    /// Units are sorted by their stored order and renumbered densely. Free
    /// list units without a size get their type's default size; grid units
    /// lose any size. Blank config values are accepted; readiness is checked
    /// at deploy time.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidSnapshot` if the snapshot exceeds the
    /// shape's capacity, repeats a unit type or id, uses a type the
    /// registry doesn't know, or carries a config field the type doesn't
    /// have or a value its field rejects.
    pub fn from_snapshot(
        snapshot: LayoutSnapshot,
        registry: &UnitConfigRegistry,
    ) -> LayoutResult<Self> {
        let LayoutSnapshot {
            shape_id,
            mut units,
        } = snapshot;

        let max = shape_id.max_units();
        if units.len() > max {
            return Err(LayoutError::InvalidSnapshot(format!(
                "{} units exceed the capacity of shape '{shape_id}' ({max})",
                units.len()
            )));
        }

        let mut types = HashSet::new();
        let mut ids = HashSet::new();
        for unit in &mut units {
            let schema = registry.schema(&unit.unit_type).ok_or_else(|| {
                LayoutError::InvalidSnapshot(format!("unknown unit type '{}'", unit.unit_type))
            })?;
            if !types.insert(unit.unit_type.clone()) {
                return Err(LayoutError::InvalidSnapshot(format!(
                    "unit type '{}' appears more than once",
                    unit.unit_type
                )));
            }
            if !ids.insert(unit.id.clone()) {
                return Err(LayoutError::InvalidSnapshot(format!(
                    "unit id '{}' appears more than once",
                    unit.id
                )));
            }
            for (key, value) in &unit.config {
                let field = schema.get_field(key).ok_or_else(|| {
                    LayoutError::InvalidSnapshot(format!(
                        "unit '{}': '{key}' is not a field of {}",
                        unit.id, unit.unit_type
                    ))
                })?;
                if !value.is_blank() {
                    field.check(value).map_err(|violation| {
                        LayoutError::InvalidSnapshot(format!("unit '{}': {violation}", unit.id))
                    })?;
                }
            }
            unit.size = if shape_id.is_grid() {
                None
            } else {
                Some(unit.size.unwrap_or(schema.default_size))
            };
        }

        units.sort_by_key(|u| u.order);
        reorder::renumber(&mut units);
        Ok(Self { shape_id, units })
    }

    /// Returns the wire snapshot of this layout.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            shape_id: self.shape_id,
            units: self.units.clone(),
        }
    }

    /// Shape identifier.
    #[must_use]
    pub const fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    /// Full shape description.
    #[must_use]
    pub const fn shape(&self) -> ContainerShape {
        self.shape_id.shape()
    }

    /// Context implied by the shape.
    #[must_use]
    pub const fn context(&self) -> LayoutContext {
        self.shape_id.context()
    }

    /// Units in order.
    #[must_use]
    pub fn units(&self) -> &[PlacementUnit] {
        &self.units
    }

    /// Visible units in order.
    pub fn visible_units(&self) -> impl Iterator<Item = &PlacementUnit> {
        self.units.iter().filter(|u| u.visible)
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the layout has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// How many more units fit.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.shape_id.max_units().saturating_sub(self.units.len())
    }

    /// Looks up a unit by id.
    #[must_use]
    pub fn unit(&self, id: &UnitId) -> Option<&PlacementUnit> {
        self.units.iter().find(|u| &u.id == id)
    }

    /// Looks up the unit of a type.
    #[must_use]
    pub fn find_by_type(&self, unit_type: &UnitType) -> Option<&PlacementUnit> {
        self.units.iter().find(|u| &u.unit_type == unit_type)
    }

    /// Looks up a unit by id, then by type tag.
    #[must_use]
    pub fn resolve(&self, id_or_type: &str) -> Option<&PlacementUnit> {
        self.units
            .iter()
            .find(|u| u.id.as_str() == id_or_type)
            .or_else(|| self.units.iter().find(|u| u.unit_type.as_str() == id_or_type))
    }

    /// Verifies the layout invariants.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidSnapshot` describing the first broken
    /// invariant.
    pub fn check_invariants(&self) -> LayoutResult<()> {
        let broken = |reason: String| Err(LayoutError::InvalidSnapshot(reason));

        if self.units.len() > self.shape_id.max_units() {
            return broken(format!(
                "{} units exceed capacity {}",
                self.units.len(),
                self.shape_id.max_units()
            ));
        }
        let mut types = HashSet::new();
        let mut ids = HashSet::new();
        for (position, unit) in self.units.iter().enumerate() {
            if unit.order != position {
                return broken(format!(
                    "unit '{}' has order {} at position {position}",
                    unit.id, unit.order
                ));
            }
            if !types.insert(&unit.unit_type) {
                return broken(format!("duplicate unit type '{}'", unit.unit_type));
            }
            if !ids.insert(&unit.id) {
                return broken(format!("duplicate unit id '{}'", unit.id));
            }
            if unit.size.is_some() == self.shape_id.is_grid() {
                return broken(format!("unit '{}' has a size mismatched to its shape", unit.id));
            }
        }
        Ok(())
    }

    fn position(&self, id: &UnitId) -> LayoutResult<usize> {
        self.units
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| LayoutError::UnitNotFound(id.clone()))
    }

    fn with_units(&self, units: Vec<PlacementUnit>) -> Self {
        Self {
            shape_id: self.shape_id,
            units,
        }
    }

    /// Adds a unit of `unit_type`, or removes it if the layout already has
    /// one (toggle semantics).
    ///
    /// New units are appended with default config from the registry,
    /// visible, and (in free lists) the type's default size.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::UnknownUnitType` for unregistered types and
    /// `LayoutError::CapacityExceeded` when the layout is full.
    pub fn add_unit(
        &self,
        registry: &UnitConfigRegistry,
        unit_type: &UnitType,
    ) -> LayoutResult<(Self, AddOutcome)> {
        if let Some(existing) = self.find_by_type(unit_type) {
            let (layout, removed) = self.remove_unit(&existing.id)?;
            return Ok((layout, AddOutcome::Removed(removed)));
        }

        let schema = registry
            .schema(unit_type)
            .ok_or_else(|| LayoutError::UnknownUnitType(unit_type.clone()))?;
        let max = self.shape_id.max_units();
        if self.units.len() >= max {
            return Err(LayoutError::CapacityExceeded { max });
        }

        let size = (!self.shape_id.is_grid()).then_some(schema.default_size);
        let unit = PlacementUnit::new(unit_type.clone(), self.units.len(), schema.default_config())
            .with_size(size);
        let id = unit.id.clone();

        let mut units = self.units.clone();
        units.push(unit);
        Ok((self.with_units(units), AddOutcome::Added(id)))
    }

    /// Removes a unit and closes the gap in the order sequence.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::UnitNotFound` if no unit has `id`.
    pub fn remove_unit(&self, id: &UnitId) -> LayoutResult<(Self, PlacementUnit)> {
        let position = self.position(id)?;
        let mut units = self.units.clone();
        let removed = units.remove(position);
        for unit in &mut units[position..] {
            unit.order -= 1;
        }
        Ok((self.with_units(units), removed))
    }

    /// Flips a unit's visibility.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::UnitNotFound` if no unit has `id`.
    pub fn toggle_visible(&self, id: &UnitId) -> LayoutResult<Self> {
        let position = self.position(id)?;
        let mut units = self.units.clone();
        units[position].visible = !units[position].visible;
        Ok(self.with_units(units))
    }

    /// Validates and stores one config field of a unit.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::UnitNotFound` if no unit has `id`, or
    /// `LayoutError::Validation` if the registry rejects the value.
    pub fn set_unit_config(
        &self,
        registry: &UnitConfigRegistry,
        id: &UnitId,
        field: &str,
        value: ConfigValue,
    ) -> LayoutResult<Self> {
        let position = self.position(id)?;
        registry.validate_field(&self.units[position].unit_type, field, &value)?;

        let mut units = self.units.clone();
        units[position].config.insert(field.to_string(), value);
        Ok(self.with_units(units))
    }

    /// Resizes a dashboard section.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::SizeNotSupported` on grid layouts and
    /// `LayoutError::UnitNotFound` if no unit has `id`.
    pub fn set_unit_size(&self, id: &UnitId, size: UnitSize) -> LayoutResult<Self> {
        if self.shape_id.is_grid() {
            return Err(LayoutError::SizeNotSupported);
        }
        let position = self.position(id)?;
        let mut units = self.units.clone();
        units[position].size = Some(size);
        Ok(self.with_units(units))
    }

    /// Switches to another shape of the same context.
    ///
    /// If the new shape holds fewer units, the lowest-order units are kept
    /// and the tail is returned in [`ShapeChange::dropped`].
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::ShapeNotSupported` if `shape_id` belongs to the
    /// other context.
    pub fn change_shape(&self, shape_id: ShapeId) -> LayoutResult<ShapeChange> {
        if shape_id.context() != self.context() {
            return Err(LayoutError::ShapeNotSupported {
                shape: shape_id,
                context: self.context(),
            });
        }

        let max = shape_id.max_units();
        let mut units = self.units.clone();
        let dropped = if units.len() > max {
            units.split_off(max)
        } else {
            Vec::new()
        };

        Ok(ShapeChange {
            layout: Self { shape_id, units },
            dropped,
        })
    }

    /// Swaps a unit with its neighbor. See [`reorder::move_adjacent`].
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::UnitNotFound` if no unit has `id`.
    pub fn move_adjacent(&self, id: &UnitId, direction: Direction) -> LayoutResult<Self> {
        reorder::move_adjacent(&self.units, id, direction).map(|units| self.with_units(units))
    }

    /// Moves a unit to a new position. See [`reorder::move_to_index`].
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::IndexOutOfRange` for invalid indices.
    pub fn move_to_index(&self, from: usize, to: usize) -> LayoutResult<Self> {
        reorder::move_to_index(&self.units, from, to).map(|units| self.with_units(units))
    }
}
