//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `load`: Load a configuration directory tree
//! - `file`: Load a single configuration file
//! - `merge`: Deep-merge configuration files
//! - `validate`: Validate an options file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod file;
pub mod load;
pub mod merge;
pub mod validate;

pub use completions::CompletionsCommand;
pub use file::{FileArgs, FileCommand};
pub use load::LoadCommand;
pub use merge::MergeCommand;
pub use validate::ValidateCommand;
