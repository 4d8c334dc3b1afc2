//! Core data structures: placement units, shapes, and presets.

mod preset;
mod shape;
mod unit;

pub use preset::{LayoutSnapshot, Preset, PresetDraft, PresetId};
pub use shape::{
    Bounds, CANVAS_HEIGHT_COMPACT, CANVAS_HEIGHT_LARGE, CANVAS_WIDTH, ContainerShape,
    FREE_LIST_CAPACITY, LayoutContext, ShapeId,
};
pub use unit::{ConfigValue, PlacementUnit, UnitConfig, UnitId, UnitSize, UnitType};
