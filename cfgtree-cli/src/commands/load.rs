//! Load command implementation.
//!
//! This module implements the `load` command, which maps a directory tree
//! onto one configuration object and prints it.

use crate::commands::file::FileArgs;
use crate::error::CliError;
use crate::utils::{build_options, print_value, GlobalOptions};
use cfgtree::load_config;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

/// Load a configuration directory tree.
#[derive(Args)]
pub struct LoadCommand {
    /// Root directory of the configuration tree
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub args: FileArgs,

    /// Levels to descend below DIR (0 keeps subdirectories empty)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Only load files named <name>.<PREFIX>.<ext>
    #[arg(long, value_name = "PREFIX")]
    pub convention_prefix: Option<String>,
}

impl LoadCommand {
    /// Execute the load command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut layer = self.args.to_layer();
        layer.max_depth = self.max_depth;
        layer.convention_prefix = self.convention_prefix;

        let options = build_options(global, layer)?;
        log::debug!("effective options: {options:?}");

        let config = load_config(&self.dir, &options)?;
        print_value(global, &Value::Object(config))
    }
}
