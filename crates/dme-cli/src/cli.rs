//! CLI argument definitions for the debug menu editor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "debug-menu-editor",
    version,
    about = "Debug Menu Editor - Inspect and edit debug menu files",
    long_about = "Inspect and edit debug menu files.\n\n\
                  A menu holds named categories of warp entries (display name,\n\
                  map name, room, spawn point and layer)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print every category and entry of a menu file.
    Show(ShowArgs),

    /// Search entries across all categories by display or map name.
    Search(SearchArgs),

    /// Create a new menu file.
    New(NewArgs),

    /// Edit menu files interactively.
    Shell(ShellArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Menu file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ShowFormatArg,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Menu file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Text to look for.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Match letter case exactly.
    #[arg(long = "case-sensitive")]
    pub case_sensitive: bool,
}

#[derive(Parser)]
pub struct NewArgs {
    /// Path of the file to create.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Add an empty category with this name (repeatable).
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,
}

#[derive(Parser)]
pub struct ShellArgs {
    /// Menu file to open on start.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShowFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
