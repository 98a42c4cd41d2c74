//! CLI argument definitions for the form state tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formstate",
    version,
    about = "Build form state trees and replay actions through the reducer",
    long_about = "Build a form state tree from a JSON value and apply form actions to it.\n\n\
                  Prints every node with its value, validity and status flags, either as \
                  a table or as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
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

    /// Include form values in log output (redacted by default).
    #[arg(long = "log-values", global = true)]
    pub log_values: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the initial state tree for a value and print it.
    Inspect(InspectArgs),

    /// Apply a log of actions to the initial state tree and print the result.
    Replay(ReplayArgs),
}

/// Options shared by every command that builds a tree.
#[derive(Args)]
pub struct TreeArgs {
    /// JSON file holding the initial form value.
    #[arg(value_name = "VALUE_JSON")]
    pub value: PathBuf,

    /// Id of the root node (dot-separated).
    #[arg(long = "id", default_value = "form")]
    pub id: String,

    /// How to print the tree.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
}

#[derive(Args)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Action log: a JSON array, or one action per line for `.jsonl`/`.ndjson`.
    #[arg(value_name = "ACTIONS")]
    pub actions: PathBuf,

    /// Exit with status 1 when the final root state is invalid.
    #[arg(long = "fail-on-invalid")]
    pub fail_on_invalid: bool,
}

/// Tree output choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
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
