//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, FileCommand, LoadCommand, MergeCommand, ValidateCommand,
};
use cfgtree::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for loading directory-structured configuration.
#[derive(Parser)]
#[command(name = "cfgtree")]
#[command(
    version,
    about = "Load nested configuration from a directory tree",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Options file (YAML) applied below CFGTREE_* variables and flags
    #[arg(long, value_name = "FILE", global = true, env = "CFGTREE_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true, ignore_case = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Load a configuration directory tree
    Load(LoadCommand),

    /// Load a single configuration file by base path
    File(FileCommand),

    /// Deep-merge configuration files, later files win
    Merge(MergeCommand),

    /// Validate an options file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
