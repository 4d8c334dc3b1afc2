//! Built-in default presets.
//!
//! The default of each context is hardcoded, always listed first, and can
//! neither be overwritten nor deleted.

use chrono::{DateTime, Utc};

use crate::layout::LayoutModel;
use crate::models::{LayoutContext, PlacementUnit, Preset, PresetId, UnitType};
use crate::registry::UnitConfigRegistry;

/// Display name of every built-in default.
pub const DEFAULT_PRESET_NAME: &str = "Default";

const DASHBOARD_UNITS: &[&str] = &[
    "reservation_summary",
    "chat_activity",
    "sales_chart",
    "notification_feed",
];

const RICH_MENU_UNITS: &[&str] = &["reserve", "chat", "menu", "access"];

/// Id of the built-in default of a context.
#[must_use]
pub fn default_preset_id(context: LayoutContext) -> PresetId {
    PresetId::from(format!("default-{context}"))
}

/// Built-in default layout of a context.
///
/// Units get their type tag as id, registry defaults as config, and (on
/// the dashboard) their type's default size. Types missing from `registry`
/// are skipped.
#[must_use]
pub fn default_layout(context: LayoutContext, registry: &UnitConfigRegistry) -> LayoutModel {
    let shape_id = context.default_shape();
    let types = match context {
        LayoutContext::Dashboard => DASHBOARD_UNITS,
        LayoutContext::RichMenu => RICH_MENU_UNITS,
    };

    let units = types
        .iter()
        .filter_map(|tag| registry.schema(&UnitType::from(*tag)))
        .enumerate()
        .map(|(order, schema)| {
            PlacementUnit::new(schema.unit_type.clone(), order, schema.default_config())
                .with_id(schema.unit_type.as_str())
                .with_size((!shape_id.is_grid()).then_some(schema.default_size))
        })
        .collect();

    LayoutModel::from_units(shape_id, units)
}

/// Built-in default preset of a context.
#[must_use]
pub fn default_preset(context: LayoutContext, registry: &UnitConfigRegistry) -> Preset {
    let description = match context {
        LayoutContext::Dashboard => "Reservations, chat, sales and notifications",
        LayoutContext::RichMenu => "Reserve, chat, menu and access buttons",
    };
    Preset {
        id: default_preset_id(context),
        name: DEFAULT_PRESET_NAME.to_string(),
        description: description.to_string(),
        context,
        snapshot: default_layout(context, registry).snapshot(),
        is_default: true,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}
