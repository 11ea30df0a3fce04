//! File command implementation.
//!
//! This module implements the `file` command, which loads the
//! highest-priority file for a base path and prints it.

use crate::error::CliError;
use crate::utils::{build_options, print_value, GlobalOptions};
use cfgtree::{load_file_config, FileLoadOptions, FormatPriority, OptionsLayer};
use clap::Args;
use std::path::PathBuf;

/// Options shared by every command that loads files.
#[derive(Args, Debug, Clone, Default)]
pub struct FileArgs {
    /// Formats to try, highest priority first (e.g. yaml,json)
    #[arg(long, value_name = "FORMATS")]
    pub format_priority: Option<FormatPriority>,

    /// Environment block to select
    #[arg(long, value_name = "NAME", conflicts_with = "environment_var")]
    pub environment: Option<String>,

    /// Variable holding the environment block to select
    #[arg(long, value_name = "VAR")]
    pub environment_var: Option<String>,

    /// Strip placeholders left after substitution
    #[arg(long)]
    pub clean_orphans: bool,
}

impl FileArgs {
    /// The options set on the command line, as the highest-precedence layer.
    pub fn to_layer(&self) -> OptionsLayer {
        OptionsLayer {
            format_priority: self.format_priority.clone(),
            environment: self.environment.clone(),
            environment_var: self.environment_var.clone(),
            clean_orphan_replaceable: self.clean_orphans.then_some(true),
            ..Default::default()
        }
    }
}

/// Load a single configuration file.
#[derive(Args)]
pub struct FileCommand {
    /// Base path without extension (e.g. config/db)
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    #[command(flatten)]
    pub args: FileArgs,
}

impl FileCommand {
    /// Execute the file command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let options = build_options(global, self.args.to_layer())?;
        let file_options = FileLoadOptions::from(&options);

        match load_file_config(&self.base, &file_options)? {
            Some(value) => print_value(global, &value),
            None => Err(CliError::NotFound(format!(
                "No configuration file found for {} (tried: {})",
                self.base.display(),
                file_options.format_priority
            ))),
        }
    }
}
