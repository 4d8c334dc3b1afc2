//! Layout editing commands.
//!
//! Each mutating command runs one full session cycle: load the applied
//! layout, edit a working copy, apply it and write it back.

use std::fmt::Write as _;
use std::path::Path;

use menuboard_core::layout::{AddOutcome, LayoutModel};
use menuboard_core::models::{ConfigValue, PlacementUnit, UnitId, UnitType};
use menuboard_core::session::LayoutEditorSession;

use crate::cli::{ContextArg, LayoutCommands, OutputFormat};
use crate::error::CliError;
use crate::format::{column_width, truncate};
use crate::util::{Workspace, create_runtime, find_unit};

/// Layout command handler
pub fn cmd_layout(
    config_path: Option<&Path>,
    context: Option<ContextArg>,
    subcmd: LayoutCommands,
) -> Result<(), CliError> {
    let workspace = Workspace::open(config_path, context)?;
    let mut session = workspace.load_session()?;

    if let LayoutCommands::Show { format } = subcmd {
        match format {
            OutputFormat::Table => println!("{}", format_table(session.applied())),
            OutputFormat::Json => println!("{}", format_json(session.applied())?),
        }
        return Ok(());
    }

    session.begin_edit()?;
    let message = edit(&workspace, &mut session, subcmd)?;
    if !session.is_dirty() {
        println!("{message}");
        return Ok(());
    }

    let runtime = create_runtime()?;
    runtime.block_on(session.apply(None))?;
    workspace.save_session(&session)?;
    println!("{message}");
    Ok(())
}

fn edit(
    workspace: &Workspace,
    session: &mut LayoutEditorSession,
    subcmd: LayoutCommands,
) -> Result<String, CliError> {
    let message = match subcmd {
        LayoutCommands::Show { .. } => String::new(),
        LayoutCommands::Add { unit_type } => {
            match session.add_unit(&UnitType::new(unit_type.trim()))? {
                AddOutcome::Added(id) => format!("Added {} (ID: {id})", unit_type.trim()),
                AddOutcome::Removed(unit) => format!(
                    "Removed {} (ID: {}); it was already in the layout",
                    unit.unit_type, unit.id
                ),
            }
        }
        LayoutCommands::Remove { unit } => {
            let id = find_unit(session.current(), &unit)?;
            let removed = session.remove_unit(&id)?;
            format!("Removed {} (ID: {})", removed.unit_type, removed.id)
        }
        LayoutCommands::Toggle { unit } => {
            let id = find_unit(session.current(), &unit)?;
            session.toggle_visible(&id)?;
            let unit = current_unit(session, &id)?;
            let state = if unit.visible { "visible" } else { "hidden" };
            format!("{} is now {state}", unit.unit_type)
        }
        LayoutCommands::Set { unit, field, value } => {
            let id = find_unit(session.current(), &unit)?;
            let parsed = parse_config_value(session, &id, &field, &value)?;
            session.set_unit_config(&id, &field, parsed.clone())?;
            let unit = current_unit(session, &id)?;
            format!("Set {field} of {} to '{parsed}'", unit.unit_type)
        }
        LayoutCommands::Size { unit, size } => {
            let id = find_unit(session.current(), &unit)?;
            session.set_unit_size(&id, size)?;
            let unit = current_unit(session, &id)?;
            format!("Resized {} to {size}", unit.unit_type)
        }
        LayoutCommands::Shape { shape } => {
            let dropped = session.change_shape(shape)?;
            let mut message = format!("Switched to shape {shape}");
            if !dropped.is_empty() {
                let names: Vec<_> = dropped.iter().map(|u| u.unit_type.as_str()).collect();
                let _ = write!(
                    message,
                    "\nDropped {} unit(s) that no longer fit: {}",
                    dropped.len(),
                    names.join(", ")
                );
            }
            message
        }
        LayoutCommands::Nudge { unit, direction } => {
            let id = find_unit(session.current(), &unit)?;
            session.move_adjacent(&id, direction)?;
            let unit = current_unit(session, &id)?;
            format!("Moved {} {direction} to position {}", unit.unit_type, unit.order)
        }
        LayoutCommands::Move { from, to } => {
            session.move_to_index(from, to)?;
            format!("Moved unit from position {from} to {to}")
        }
        LayoutCommands::Reset => {
            workspace.preset_store().reset_to_default(session)?;
            "Reset layout to the built-in default".to_string()
        }
    };
    Ok(message)
}

fn current_unit<'a>(
    session: &'a LayoutEditorSession,
    id: &UnitId,
) -> Result<&'a PlacementUnit, CliError> {
    session
        .current()
        .unit(id)
        .ok_or_else(|| CliError::Layout(format!("Unit not found: {id}")))
}

/// Reads a command-line value as the kind the field expects. Unknown fields
/// pass through as text and are rejected by the session.
fn parse_config_value(
    session: &LayoutEditorSession,
    id: &UnitId,
    field: &str,
    input: &str,
) -> Result<ConfigValue, CliError> {
    let unit = current_unit(session, id)?;
    let descriptor = session
        .registry()
        .schema(&unit.unit_type)
        .and_then(|schema| schema.get_field(field));
    match descriptor {
        Some(descriptor) => descriptor
            .parse_value(input)
            .map_err(|v| CliError::Layout(v.to_string())),
        None => Ok(ConfigValue::from(input)),
    }
}

/// Format a layout as a table string
pub fn format_table(layout: &LayoutModel) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Layout: {} (shape {}, {}/{} units)",
        layout.context(),
        layout.shape_id(),
        layout.len(),
        layout.shape().max_units
    );
    if layout.is_empty() {
        output.push_str("No units.");
        return output;
    }

    let shape = layout.shape();
    let placements: Vec<String> = layout
        .units()
        .iter()
        .map(|u| match (u.size, shape.cell(u.order)) {
            (Some(size), _) => size.to_string(),
            (None, Some((row, col))) => format!("row {} col {}", row + 1, col + 1),
            (None, None) => "-".to_string(),
        })
        .collect();
    let id_width = column_width("ID", layout.units().iter().map(|u| u.id.as_str()));
    let type_width = column_width("TYPE", layout.units().iter().map(|u| u.unit_type.as_str()));
    let place_width = column_width("PLACE", placements.iter().map(String::as_str));

    let _ = writeln!(
        output,
        "{:<5}  {:<id_width$}  {:<type_width$}  {:<7}  {:<place_width$}  CONFIG",
        "ORDER", "ID", "TYPE", "VISIBLE", "PLACE"
    );
    let _ = writeln!(
        output,
        "{:-<5}  {:-<id_width$}  {:-<type_width$}  {:-<7}  {:-<place_width$}  {:-<6}",
        "", "", "", "", "", ""
    );
    for (unit, place) in layout.units().iter().zip(&placements) {
        let config: Vec<String> = unit
            .config
            .iter()
            .filter(|(_, v)| !v.is_blank())
            .map(|(k, v)| format!("{k}={}", truncate(&v.to_string(), 24)))
            .collect();
        let _ = writeln!(
            output,
            "{:<5}  {:<id_width$}  {:<type_width$}  {:<7}  {:<place_width$}  {}",
            unit.order,
            unit.id.as_str(),
            unit.unit_type.as_str(),
            if unit.visible { "yes" } else { "no" },
            place,
            config.join(" ")
        );
    }
    output.trim_end().to_string()
}

/// Format a layout as JSON string
///
/// # Errors
///
/// Returns `CliError::Config` if JSON serialization fails.
pub fn format_json(layout: &LayoutModel) -> Result<String, CliError> {
    serde_json::to_string_pretty(layout)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}
