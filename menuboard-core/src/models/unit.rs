//! Placement unit model.
//!
//! A placement unit is one configurable, orderable item inside a layout:
//! a dashboard section or a rich-menu button.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a unit within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    /// Creates a new random unit ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for UnitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UnitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag of a unit type, used as the key into the unit config registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitType(String);

impl UnitType {
    /// Creates a unit type tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Width of a dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSize {
    /// One quarter of the row
    Quarter,
    /// One third of the row
    Third,
    /// Half of the row
    Half,
    /// Two thirds of the row
    TwoThirds,
    /// Three quarters of the row
    ThreeQuarters,
    /// The whole row
    #[default]
    Full,
}

impl UnitSize {
    /// Number of columns spanned on a 12-column dashboard grid.
    #[must_use]
    pub const fn columns(self) -> u8 {
        match self {
            Self::Quarter => 3,
            Self::Third => 4,
            Self::Half => 6,
            Self::TwoThirds => 8,
            Self::ThreeQuarters => 9,
            Self::Full => 12,
        }
    }

    /// Returns all sizes from narrowest to widest.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Quarter,
            Self::Third,
            Self::Half,
            Self::TwoThirds,
            Self::ThreeQuarters,
            Self::Full,
        ]
    }

    /// Returns the wire name of the size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quarter => "quarter",
            Self::Third => "third",
            Self::Half => "half",
            Self::TwoThirds => "two-thirds",
            Self::ThreeQuarters => "three-quarters",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for UnitSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown size '{s}'"))
    }
}

/// A single config field value.
///
/// Untagged on the wire, so a preset body reads as plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean toggle
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text, URL, select option or asset reference
    Text(String),
}

impl ConfigValue {
    /// Returns the text value, if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for empty or whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Name of the value's kind, for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Field key → value map of a unit. Ordered so snapshots compare and
/// serialize deterministically.
pub type UnitConfig = BTreeMap<String, ConfigValue>;

/// One unit placed in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementUnit {
    /// Stable identifier, unique within the layout
    pub id: UnitId,
    /// Registry tag of the unit
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    /// Dense 0-based position
    pub order: usize,
    /// Whether the unit is shown
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Section width (dashboard layouts only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<UnitSize>,
    /// Type-specific configuration
    #[serde(default)]
    pub config: UnitConfig,
}

const fn default_visible() -> bool {
    true
}

impl PlacementUnit {
    /// Creates a visible unit with a fresh ID.
    #[must_use]
    pub fn new(unit_type: UnitType, order: usize, config: UnitConfig) -> Self {
        Self {
            id: UnitId::new(),
            unit_type,
            order,
            visible: true,
            size: None,
            config,
        }
    }

    /// Sets the unit ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<UnitId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the section size.
    #[must_use]
    pub const fn with_size(mut self, size: Option<UnitSize>) -> Self {
        self.size = size;
        self
    }

    /// Returns a config value by key.
    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<&ConfigValue> {
        self.config.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ids_are_unique() {
        assert_ne!(UnitId::new(), UnitId::new());
    }

    #[test]
    fn unit_size_parses_kebab_case() {
        assert_eq!("two-thirds".parse::<UnitSize>(), Ok(UnitSize::TwoThirds));
        assert_eq!("FULL".parse::<UnitSize>(), Ok(UnitSize::Full));
        assert!("double".parse::<UnitSize>().is_err());
    }

    #[test]
    fn unit_size_columns_fit_twelve_grid() {
        for size in UnitSize::all() {
            assert_eq!(12 % size.columns(), 0, "{size} should divide the grid");
        }
    }

    #[test]
    fn config_value_untagged_json() {
        let config: UnitConfig =
            serde_json::from_str(r#"{"label":"Reserve","limit":10,"enabled":true}"#).unwrap();
        assert_eq!(config["label"], ConfigValue::from("Reserve"));
        assert_eq!(config["limit"], ConfigValue::Number(10.0));
        assert_eq!(config["enabled"], ConfigValue::Bool(true));
    }

    #[test]
    fn placement_unit_wire_format_uses_type_key() {
        let unit = PlacementUnit::new(UnitType::from("chat"), 1, UnitConfig::new()).with_id("u1");
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["type"], "chat");
        assert_eq!(json["order"], 1);
        assert!(json.get("size").is_none());
    }

    #[test]
    fn placement_unit_defaults_to_visible() {
        let unit: PlacementUnit =
            serde_json::from_str(r#"{"id":"x","type":"menu","order":0}"#).unwrap();
        assert!(unit.visible);
        assert!(unit.config.is_empty());
    }
}
