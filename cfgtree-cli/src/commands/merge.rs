//! Merge command implementation.
//!
//! This module implements the `merge` command, which deep-merges JSON and
//! YAML files from left to right and prints the result.

use crate::error::CliError;
use crate::utils::{print_value, GlobalOptions};
use cfgtree::{ConfigMap, ConfigMerger, Error as LibError, Format};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Deep-merge configuration files.
#[derive(Args)]
pub struct MergeCommand {
    /// Files to merge; later files take precedence
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl MergeCommand {
    /// Execute the merge command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let sources = self
            .files
            .iter()
            .map(PathBuf::as_path)
            .map(read_mapping)
            .collect::<Result<Vec<_>, _>>()?;

        let merged = ConfigMerger::merge(sources);
        print_value(global, &Value::Object(merged))
    }
}

/// Read a file whose format is given by its extension; it must hold a mapping.
fn read_mapping(path: &Path) -> Result<ConfigMap, CliError> {
    if !path.is_file() {
        return Err(CliError::InvalidArguments(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let format: Format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .parse()
        .map_err(|_| {
            CliError::InvalidArguments(format!(
                "Cannot determine format of {} (expected .json, .yaml or .yml)",
                path.display()
            ))
        })?;

    let contents = fs::read_to_string(path)?;
    let value = format.parse(&contents).map_err(|message| LibError::Parse {
        message,
        path: path.to_path_buf(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::InvalidArguments(format!(
            "{} does not contain a mapping",
            path.display()
        ))),
    }
}
