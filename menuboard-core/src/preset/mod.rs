//! Named layout presets
//!
//! [`PresetStore`] lists, saves, applies and deletes presets of one context
//! through a [`LayoutRepository`](crate::repository::LayoutRepository). The
//! built-in default of each context lives in [`defaults`].

pub mod defaults;
mod store;

pub use defaults::{DEFAULT_PRESET_NAME, default_layout, default_preset, default_preset_id};
pub use store::PresetStore;
