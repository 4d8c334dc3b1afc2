//! Unit config registry
//!
//! Table-driven schemas for every placement-unit type. Callers look a type up
//! once and work with its field descriptors; nothing else in the crate
//! branches on unit type names, so adding a unit type is a single
//! [`UnitConfigRegistry::register`] call.
//!
//! # Example
//!
//! ```
//! use menuboard_core::models::{ConfigValue, UnitType};
//! use menuboard_core::registry::UnitConfigRegistry;
//!
//! let registry = UnitConfigRegistry::rich_menu();
//! let reserve = UnitType::from("reserve");
//!
//! assert!(registry.contains(&reserve));
//! let err = registry
//!     .validate_field(&reserve, "url", &ConfigValue::from("not a url"))
//!     .unwrap_err();
//! assert_eq!(err.field, "url");
//! ```

mod builtin;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{ConfigValue, UnitConfig, UnitSize, UnitType};

/// Accepted shape of URL fields: absolute http(s) with a dotted host.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/?#.]+(\.[^\s/?#.]+)+(:\d+)?([/?#]\S*)?$")
        .expect("URL_REGEX is a valid regex pattern")
});

/// Kind of a config field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text
    #[default]
    Text,
    /// On/off toggle
    Boolean,
    /// One of a fixed list of options
    Select,
    /// Number, optionally bounded
    Number,
    /// Absolute http(s) URL
    Url,
    /// Multi-line text
    Textarea,
}

impl FieldKind {
    /// Returns the display name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Number => "number",
            Self::Url => "url",
            Self::Textarea => "textarea",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field key (or `type` for an unknown unit type)
    pub field: String,
    /// Human-readable reason
    pub reason: String,
}

impl Violation {
    /// Creates a violation.
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Describes one config field of a unit type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Config key
    pub key: String,
    /// Form label
    pub label: String,
    /// Field kind
    pub kind: FieldKind,
    /// Allowed values of a select field
    pub options: Vec<String>,
    /// Lower bound of a number field
    pub min: Option<f64>,
    /// Upper bound of a number field
    pub max: Option<f64>,
    /// Value a new unit starts with
    pub default: ConfigValue,
    /// Whether an empty value is a violation
    pub required: bool,
    /// Maximum length of text values, in characters
    pub max_length: Option<usize>,
    /// Format non-empty text values must match (asset references etc.)
    pub pattern: Option<Regex>,
}

impl FieldDescriptor {
    fn base(key: &str, label: &str, kind: FieldKind, default: ConfigValue) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            options: Vec::new(),
            min: None,
            max: None,
            default,
            required: false,
            max_length: None,
            pattern: None,
        }
    }

    /// Creates a single-line text field.
    #[must_use]
    pub fn text(key: &str, label: &str, default: &str) -> Self {
        Self::base(key, label, FieldKind::Text, ConfigValue::from(default))
    }

    /// Creates a multi-line text field.
    #[must_use]
    pub fn textarea(key: &str, label: &str, default: &str) -> Self {
        Self::base(key, label, FieldKind::Textarea, ConfigValue::from(default))
    }

    /// Creates a URL field.
    #[must_use]
    pub fn url(key: &str, label: &str, default: &str) -> Self {
        Self::base(key, label, FieldKind::Url, ConfigValue::from(default))
    }

    /// Creates a boolean field.
    #[must_use]
    pub fn boolean(key: &str, label: &str, default: bool) -> Self {
        Self::base(key, label, FieldKind::Boolean, ConfigValue::Bool(default))
    }

    /// Creates a bounded number field.
    #[must_use]
    pub fn number(key: &str, label: &str, min: f64, max: f64, default: f64) -> Self {
        let mut field = Self::base(key, label, FieldKind::Number, ConfigValue::Number(default));
        field.min = Some(min);
        field.max = Some(max);
        field
    }

    /// Creates a select field. The default must be one of `options`.
    #[must_use]
    pub fn select(key: &str, label: &str, options: &[&str], default: &str) -> Self {
        let mut field = Self::base(key, label, FieldKind::Select, ConfigValue::from(default));
        field.options = options.iter().map(|o| (*o).to_string()).collect();
        field
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Limits text length.
    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Requires non-empty text to match `pattern`.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Checks a value against this field.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check(&self, value: &ConfigValue) -> Result<(), Violation> {
        let fail = |reason: String| Err(Violation::new(&self.key, reason));

        match self.kind {
            FieldKind::Boolean => {
                if value.as_bool().is_none() {
                    return fail(format!("expected boolean, got {}", value.kind_name()));
                }
            }
            FieldKind::Number => {
                let Some(n) = value.as_number() else {
                    return fail(format!("expected number, got {}", value.kind_name()));
                };
                if !n.is_finite() {
                    return fail("must be a finite number".to_string());
                }
                let below = self.min.is_some_and(|min| n < min);
                let above = self.max.is_some_and(|max| n > max);
                if below || above {
                    return fail(match (self.min, self.max) {
                        (Some(min), Some(max)) => format!("must be between {min} and {max}"),
                        (Some(min), None) => format!("must be at least {min}"),
                        (None, Some(max)) => format!("must be at most {max}"),
                        (None, None) => unreachable!("bounds checked above"),
                    });
                }
            }
            FieldKind::Select => {
                let Some(s) = value.as_str() else {
                    return fail(format!("expected text, got {}", value.kind_name()));
                };
                if s.is_empty() && !self.required {
                    return Ok(());
                }
                if !self.options.iter().any(|o| o == s) {
                    return fail(format!("must be one of: {}", self.options.join(", ")));
                }
            }
            FieldKind::Text | FieldKind::Textarea | FieldKind::Url => {
                let Some(s) = value.as_str() else {
                    return fail(format!("expected text, got {}", value.kind_name()));
                };
                if s.trim().is_empty() {
                    return if self.required {
                        fail("is required".to_string())
                    } else {
                        Ok(())
                    };
                }
                if let Some(max) = self.max_length
                    && s.chars().count() > max
                {
                    return fail(format!("must be at most {max} characters"));
                }
                if self.kind == FieldKind::Url && !URL_REGEX.is_match(s.trim()) {
                    return fail("must be an http(s) URL".to_string());
                }
                if let Some(ref pattern) = self.pattern
                    && !pattern.is_match(s.trim())
                {
                    return fail("does not match the expected format".to_string());
                }
            }
        }
        Ok(())
    }

    /// Parses user input into a value of this field's kind.
    ///
    /// The parsed value is not validated; pass it through [`Self::check`].
    ///
    /// # Errors
    ///
    /// Returns a violation when the input can't be read as the field's kind.
    pub fn parse_value(&self, input: &str) -> Result<ConfigValue, Violation> {
        match self.kind {
            FieldKind::Boolean => match input.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(ConfigValue::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(ConfigValue::Bool(false)),
                _ => Err(Violation::new(&self.key, format!("'{input}' is not a boolean"))),
            },
            FieldKind::Number => input
                .trim()
                .parse::<f64>()
                .map(ConfigValue::Number)
                .map_err(|_| Violation::new(&self.key, format!("'{input}' is not a number"))),
            _ => Ok(ConfigValue::from(input)),
        }
    }
}

/// Schema of one unit type.
#[derive(Debug, Clone)]
pub struct UnitSchema {
    /// Type tag
    pub unit_type: UnitType,
    /// Display name
    pub label: String,
    /// Initial section size in free-list layouts
    pub default_size: UnitSize,
    /// Fields in form order
    pub fields: Vec<FieldDescriptor>,
}

impl UnitSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(unit_type: impl Into<UnitType>, label: &str) -> Self {
        Self {
            unit_type: unit_type.into(),
            label: label.to_string(),
            default_size: UnitSize::default(),
            fields: Vec::new(),
        }
    }

    /// Sets the initial section size.
    #[must_use]
    pub const fn with_default_size(mut self, size: UnitSize) -> Self {
        self.default_size = size;
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by key.
    #[must_use]
    pub fn get_field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Default config of a new unit of this type.
    #[must_use]
    pub fn default_config(&self) -> UnitConfig {
        self.fields
            .iter()
            .map(|f| (f.key.clone(), f.default.clone()))
            .collect()
    }
}

/// Registry mapping unit types to their schemas.
#[derive(Debug, Clone, Default)]
pub struct UnitConfigRegistry {
    schemas: BTreeMap<UnitType, UnitSchema>,
}

impl UnitConfigRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a schema.
    pub fn register(&mut self, schema: UnitSchema) {
        tracing::trace!(unit_type = %schema.unit_type, fields = schema.fields.len(), "Registered unit schema");
        self.schemas.insert(schema.unit_type.clone(), schema);
    }

    /// Builder-style [`Self::register`].
    #[must_use]
    pub fn with_schema(mut self, schema: UnitSchema) -> Self {
        self.register(schema);
        self
    }

    /// Returns the schema of a unit type.
    #[must_use]
    pub fn schema(&self, unit_type: &UnitType) -> Option<&UnitSchema> {
        self.schemas.get(unit_type)
    }

    /// Returns true if the type is registered.
    #[must_use]
    pub fn contains(&self, unit_type: &UnitType) -> bool {
        self.schemas.contains_key(unit_type)
    }

    /// Registered types in sorted order.
    #[must_use]
    pub fn unit_types(&self) -> Vec<&UnitType> {
        self.schemas.keys().collect()
    }

    /// All schemas in type order.
    pub fn schemas(&self) -> impl Iterator<Item = &UnitSchema> {
        self.schemas.values()
    }

    /// Default config of a unit type, or `None` if unregistered.
    #[must_use]
    pub fn default_config(&self, unit_type: &UnitType) -> Option<UnitConfig> {
        self.schema(unit_type).map(UnitSchema::default_config)
    }

    /// Validates a whole config and returns every violation.
    ///
    /// Reports unknown keys, missing required fields, and every per-field
    /// constraint. An unregistered type yields a single `type` violation.
    #[must_use]
    pub fn validate(&self, unit_type: &UnitType, config: &UnitConfig) -> Vec<Violation> {
        let Some(schema) = self.schema(unit_type) else {
            return vec![Violation::new(
                "type",
                format!("unknown unit type '{unit_type}'"),
            )];
        };

        let mut violations: Vec<Violation> = config
            .keys()
            .filter(|key| schema.get_field(key).is_none())
            .map(|key| Violation::new(key.as_str(), format!("is not a field of {unit_type}")))
            .collect();

        for field in &schema.fields {
            match config.get(&field.key) {
                Some(value) => {
                    if let Err(violation) = field.check(value) {
                        violations.push(violation);
                    }
                }
                None if field.required => {
                    violations.push(Violation::new(&field.key, "is required"));
                }
                None => {}
            }
        }
        violations
    }

    /// Validates a single field value.
    ///
    /// # Errors
    ///
    /// Returns the violation if the type or field is unknown or the value
    /// breaks the field's constraints.
    pub fn validate_field(
        &self,
        unit_type: &UnitType,
        key: &str,
        value: &ConfigValue,
    ) -> Result<(), Violation> {
        let schema = self.schema(unit_type).ok_or_else(|| {
            Violation::new("type", format!("unknown unit type '{unit_type}'"))
        })?;
        let field = schema
            .get_field(key)
            .ok_or_else(|| Violation::new(key, format!("is not a field of {unit_type}")))?;
        field.check(value)
    }
}
