//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use menuboard_core::config::{BackendMode, CONFIG_DIR_ENV};
use menuboard_core::layout::Direction;
use menuboard_core::models::{LayoutContext, ShapeId, UnitSize};

/// `Menuboard` command-line interface for arranging dashboard sections and
/// rich-menu buttons
#[derive(Parser)]
#[command(name = "menuboard")]
#[command(author, version, about = "Menuboard layout editor command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = CONFIG_DIR_ENV)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Layout to operate on (defaults to `editor.default_context`)
    #[arg(long, global = true, value_enum)]
    pub context: Option<ContextArg>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List unit types and their fields
    #[command(about = "List the unit types available in the context")]
    Types,

    /// Edit the applied layout
    #[command(subcommand)]
    Layout(LayoutCommands),

    /// Manage named presets
    #[command(subcommand)]
    Preset(PresetCommands),

    /// Publish the applied rich menu
    #[command(about = "Deploy the applied rich-menu layout")]
    Deploy {
        /// Print the deploy plan without publishing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Layout subcommands
///
/// Every mutating subcommand edits a working copy of the applied layout and
/// applies it when the mutation succeeds.
#[derive(Subcommand)]
pub enum LayoutCommands {
    /// Show the applied layout
    #[command(about = "Show the units of the applied layout")]
    Show {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Add a unit, or remove it if the layout already has one of that type
    #[command(about = "Toggle a unit type in the layout")]
    Add {
        /// Unit type tag (see `menuboard types`)
        unit_type: String,
    },

    /// Remove a unit
    #[command(about = "Remove a unit from the layout")]
    Remove {
        /// Unit ID or type
        unit: String,
    },

    /// Show or hide a unit
    #[command(about = "Toggle the visibility of a unit")]
    Toggle {
        /// Unit ID or type
        unit: String,
    },

    /// Set one config field of a unit
    #[command(about = "Set a unit config field")]
    Set {
        /// Unit ID or type
        unit: String,

        /// Field key
        field: String,

        /// New value
        value: String,
    },

    /// Resize a dashboard section
    #[command(about = "Resize a dashboard section")]
    Size {
        /// Unit ID or type
        unit: String,

        /// New size (quarter, third, half, two-thirds, three-quarters, full)
        size: UnitSize,
    },

    /// Switch the container shape
    #[command(about = "Switch the container shape")]
    Shape {
        /// Shape ID (free, 1x1, 1x2, 1x3, 2x2, 2x3)
        shape: ShapeId,
    },

    /// Swap a unit with its neighbor
    #[command(about = "Move a unit one step up or down")]
    Nudge {
        /// Unit ID or type
        unit: String,

        /// Direction (up or down)
        direction: Direction,
    },

    /// Move a unit to another position
    #[command(about = "Move the unit at one position to another")]
    Move {
        /// Current position (0-based order)
        from: usize,

        /// Target position (0-based order)
        to: usize,
    },

    /// Restore the built-in default layout
    #[command(about = "Reset the layout to the built-in default")]
    Reset,
}

/// Preset subcommands
#[derive(Subcommand)]
pub enum PresetCommands {
    /// List all presets
    #[command(about = "List presets, the default first")]
    List {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Show preset details
    #[command(about = "Show preset details and units")]
    Show {
        /// Preset name or ID
        name: String,
    },

    /// Save the applied layout as a preset
    #[command(about = "Save the applied layout under a name")]
    Save {
        /// Preset name; an existing preset with this name is overwritten
        name: String,

        /// Description; overwriting without one keeps the stored description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Apply a preset
    #[command(about = "Load a preset and apply it")]
    Load {
        /// Preset name or ID
        name: String,
    },

    /// Delete a preset
    #[command(about = "Delete a stored preset")]
    Delete {
        /// Preset name or ID
        name: String,
    },
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    #[command(about = "Show settings and the configuration directory")]
    Show,

    /// Write a settings file
    #[command(about = "Create or update settings.toml")]
    Init {
        /// Preset backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Base URL of the remote backend
        #[arg(long)]
        base_url: Option<String>,

        /// Bearer token of the remote backend
        #[arg(long, env = "MENUBOARD_API_TOKEN", hide_env_values = true)]
        api_token: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Default layout context
        #[arg(long, value_enum)]
        default_context: Option<ContextArg>,
    },
}

/// Output format for list commands
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}

/// Layout context argument
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContextArg {
    /// Admin dashboard sections
    Dashboard,
    /// Chat rich-menu buttons
    RichMenu,
}

impl From<ContextArg> for LayoutContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Dashboard => Self::Dashboard,
            ContextArg::RichMenu => Self::RichMenu,
        }
    }
}

/// Preset backend argument
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// In-process mock, nothing is kept
    Memory,
    /// JSON files in the configuration directory
    File,
    /// Dashboard REST API
    Remote,
}

impl From<BackendArg> for BackendMode {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Memory => Self::Memory,
            BackendArg::File => Self::File,
            BackendArg::Remote => Self::Remote,
        }
    }
}
