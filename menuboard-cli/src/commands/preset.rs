//! Preset management commands.

use std::fmt::Write as _;
use std::path::Path;

use menuboard_core::models::Preset;

use crate::cli::{ContextArg, OutputFormat, PresetCommands};
use crate::error::CliError;
use crate::format::{column_width, truncate};
use crate::util::{Workspace, create_runtime};

/// Preset command handler
pub fn cmd_preset(
    config_path: Option<&Path>,
    context: Option<ContextArg>,
    subcmd: PresetCommands,
) -> Result<(), CliError> {
    let workspace = Workspace::open(config_path, context)?;
    let store = workspace.preset_store();
    let runtime = create_runtime()?;

    match subcmd {
        PresetCommands::List { format } => {
            let presets = runtime.block_on(store.list())?;
            match format {
                OutputFormat::Table => println!("{}", format_table(&presets)),
                OutputFormat::Json => println!("{}", format_json(&presets)?),
            }
        }
        PresetCommands::Show { name } => {
            let preset = runtime.block_on(store.find(&name))?;
            print_details(&preset);
        }
        PresetCommands::Save { name, description } => {
            let session = workspace.load_session()?;
            let preset = runtime.block_on(session.save_as_preset(
                &store,
                &name,
                description.as_deref(),
            ))?;
            println!("Saved preset '{}' (ID: {})", preset.name, preset.id);
        }
        PresetCommands::Load { name } => {
            let mut session = workspace.load_session()?;
            let preset = runtime.block_on(store.apply(&mut session, &name))?;
            runtime.block_on(session.apply(None))?;
            workspace.save_session(&session)?;
            println!(
                "Applied preset '{}' ({} units, shape {})",
                preset.name,
                session.applied().len(),
                session.applied().shape_id()
            );
        }
        PresetCommands::Delete { name } => {
            let preset = runtime.block_on(store.find(&name))?;
            runtime.block_on(store.delete(&preset.id))?;
            println!("Deleted preset '{}' (ID: {})", preset.name, preset.id);
        }
    }

    Ok(())
}

fn print_details(preset: &Preset) {
    println!("Preset Details:");
    println!("  ID:       {}", preset.id);
    println!("  Name:     {}", preset.name);
    if !preset.description.is_empty() {
        println!("  Description: {}", preset.description);
    }
    println!("  Context:  {}", preset.context);
    println!("  Shape:    {}", preset.snapshot.shape_id);
    if preset.is_default {
        println!("  Default:  yes (built-in, protected)");
    } else {
        println!("  Updated:  {}", preset.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("  Units:");
    for unit in &preset.snapshot.units {
        let hidden = if unit.visible { "" } else { " (hidden)" };
        println!("    {}. {}{hidden}", unit.order, unit.unit_type);
    }
}

/// Format presets as a table string
pub fn format_table(presets: &[Preset]) -> String {
    if presets.is_empty() {
        return "No presets found.".to_string();
    }

    let mut output = String::new();
    let names: Vec<String> = presets
        .iter()
        .map(|p| {
            if p.is_default {
                format!("{} *", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect();
    let name_width = column_width("NAME", names.iter().map(String::as_str));
    let id_width = column_width("ID", presets.iter().map(|p| p.id.as_str()));

    let _ = writeln!(
        output,
        "{:<name_width$}  {:<id_width$}  {:<5}  {:<5}  DESCRIPTION",
        "NAME", "ID", "SHAPE", "UNITS"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<id_width$}  {:-<5}  {:-<5}  {:-<11}",
        "", "", "", "", ""
    );
    for (preset, name) in presets.iter().zip(&names) {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<id_width$}  {:<5}  {:<5}  {}",
            name,
            preset.id.as_str(),
            preset.snapshot.shape_id.as_str(),
            preset.snapshot.units.len(),
            truncate(&preset.description, 40)
        );
    }
    output.push_str("\n* built-in default");
    output
}

/// Format presets as JSON string
///
/// # Errors
///
/// Returns `CliError::Config` if JSON serialization fails.
pub fn format_json(presets: &[Preset]) -> Result<String, CliError> {
    serde_json::to_string_pretty(presets)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}
