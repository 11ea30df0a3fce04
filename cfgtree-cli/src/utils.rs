//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including options assembly and output rendering.

use crate::error::CliError;
use cfgtree::{LoadOptions, LoadOptionsBuilder, OptionsLayer, OutputFormat};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Options file applied below `CFGTREE_*` variables and flags.
    pub options: Option<PathBuf>,

    /// Output format for loaded configuration.
    pub output: OutputFormat,
}

/// Assemble loader options.
///
/// Options are merged from multiple sources with precedence:
/// 1. Command-line flags (highest priority)
/// 2. Environment variables
/// 3. The `--options` file
/// 4. Built-in defaults (lowest priority)
pub fn build_options(global: &GlobalOptions, flags: OptionsLayer) -> Result<LoadOptions, CliError> {
    let mut builder = LoadOptionsBuilder::new().with_layer(flags);

    if let Some(path) = &global.options {
        if !path.is_file() {
            return Err(CliError::InvalidArguments(format!(
                "Options file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_options_file(path);
    }

    if global.verbose {
        builder = builder.with_callback(Arc::new(|path: &Path| {
            log::debug!("visiting {}", path.display());
        }));
    }

    builder.build().map_err(CliError::from)
}

/// Render a value in the selected output format and print it to stdout.
pub fn print_value(global: &GlobalOptions, value: &Value) -> Result<(), CliError> {
    let rendered = global.output.render(value)?;
    print!("{rendered}");
    Ok(())
}
