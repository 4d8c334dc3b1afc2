//! List unit types command.

use std::fmt::Write as _;
use std::path::Path;

use menuboard_core::registry::{FieldDescriptor, UnitConfigRegistry};

use crate::cli::ContextArg;
use crate::error::CliError;
use crate::util::Workspace;

/// List unit types command handler
pub fn cmd_types(config_path: Option<&Path>, context: Option<ContextArg>) -> Result<(), CliError> {
    let workspace = Workspace::open(config_path, context)?;
    println!("Unit types ({}):", workspace.context);
    println!("{}", format_types(&workspace.registry()));
    Ok(())
}

/// Format every schema of a registry with its fields
pub fn format_types(registry: &UnitConfigRegistry) -> String {
    let mut output = String::new();
    for schema in registry.schemas() {
        let _ = writeln!(
            output,
            "  {} - {} (default size: {})",
            schema.unit_type, schema.label, schema.default_size
        );
        for field in &schema.fields {
            let _ = writeln!(output, "      {}", describe_field(field));
        }
    }
    output.trim_end().to_string()
}

fn describe_field(field: &FieldDescriptor) -> String {
    let mut line = format!("{:<16} {:<9}", field.key, field.kind.as_str());
    if field.required {
        line.push_str(" required");
    }
    if !field.options.is_empty() {
        let _ = write!(line, " one of [{}]", field.options.join(", "));
    }
    match (field.min, field.max) {
        (Some(min), Some(max)) => {
            let _ = write!(line, " {min}..={max}");
        }
        (Some(min), None) => {
            let _ = write!(line, " >= {min}");
        }
        (None, Some(max)) => {
            let _ = write!(line, " <= {max}");
        }
        (None, None) => {}
    }
    if let Some(max) = field.max_length {
        let _ = write!(line, " max {max} chars");
    }
    if !field.default.is_blank() {
        let _ = write!(line, " (default: {})", field.default);
    }
    line
}
