//! Reordering algorithms for placement units
//!
//! Pure functions (input slice in, new vector out) so they can be tested
//! without a layout or an editor session. The two moves are intentionally
//! separate: dashboards nudge a section one step with [`move_adjacent`],
//! the menu grid drops a button at a position with [`move_to_index`]. For
//! the same intent they produce different sequences once more than two
//! units are involved.

use std::fmt;
use std::str::FromStr;

use crate::error::{LayoutError, LayoutResult};
use crate::models::{PlacementUnit, UnitId};

/// Direction of an adjacent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards order 0
    Up,
    /// Towards the end
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "left" | "before" => Ok(Self::Up),
            "down" | "right" | "after" => Ok(Self::Down),
            _ => Err(format!("unknown direction '{s}' (expected up or down)")),
        }
    }
}

/// Swaps a unit's order with its neighbor in `direction`, then stable-sorts
/// by order.
///
/// Moving past either boundary is a no-op and returns the units unchanged.
///
/// # Errors
///
/// Returns `LayoutError::UnitNotFound` if no unit has `unit_id`.
pub fn move_adjacent(
    units: &[PlacementUnit],
    unit_id: &UnitId,
    direction: Direction,
) -> LayoutResult<Vec<PlacementUnit>> {
    let mut next = units.to_vec();
    let index = next
        .iter()
        .position(|u| &u.id == unit_id)
        .ok_or_else(|| LayoutError::UnitNotFound(unit_id.clone()))?;
    let current = next[index].order;

    let target = match direction {
        Direction::Up => current.checked_sub(1),
        Direction::Down => current.checked_add(1),
    };
    let Some(neighbor) = target.and_then(|order| next.iter().position(|u| u.order == order))
    else {
        return Ok(next);
    };

    let neighbor_order = next[neighbor].order;
    next[neighbor].order = current;
    next[index].order = neighbor_order;
    next.sort_by_key(|u| u.order);
    Ok(next)
}

/// Removes the unit at `from` and re-inserts it at `to` in the shortened
/// list (splice, not swap), then renumbers orders densely.
///
/// `[A, B, C, D]` with `from = 0, to = 2` becomes `[B, C, A, D]`.
///
/// # Errors
///
/// Returns `LayoutError::IndexOutOfRange` if either index is not a valid
/// position in `units`.
pub fn move_to_index(
    units: &[PlacementUnit],
    from: usize,
    to: usize,
) -> LayoutResult<Vec<PlacementUnit>> {
    let len = units.len();
    for index in [from, to] {
        if index >= len {
            return Err(LayoutError::IndexOutOfRange { index, len });
        }
    }

    let mut next = units.to_vec();
    let unit = next.remove(from);
    next.insert(to, unit);
    renumber(&mut next);
    Ok(next)
}

/// Assigns `order = position` to every unit.
pub fn renumber(units: &mut [PlacementUnit]) {
    for (position, unit) in units.iter_mut().enumerate() {
        unit.order = position;
    }
}
