#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cfgtree
//!
//! A library for assembling one nested configuration object out of a
//! directory tree of JSON and YAML files.
//!
//! Every file becomes a key named after its base name and every directory a
//! nested object. Same-named files in different formats are resolved by a
//! format priority, per-environment blocks are folded into their `default`
//! block, and `${VAR}`, `{{ VAR }}` and `<% expr %>` placeholders in string
//! values are substituted.
//!
//! ## Core Types
//!
//! - [`load_config`] and [`load_file_config`]: Loading entry points
//! - [`ConfigLoader`]: Loader with an injected [`Substitution`] engine
//! - [`LoadOptions`] and [`LoadOptionsBuilder`]: Loader options
//! - [`ConfigMerger`] and [`deep_merge_config`]: Deep merging
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use cfgtree::{load_config, EnvironmentSelection, LoadOptions};
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(
//!     dir.path().join("db.yaml"),
//!     "default:\n  pool: 5\nproduction:\n  pool: 50\n",
//! )
//! .unwrap();
//!
//! let options = LoadOptions {
//!     environment: EnvironmentSelection::Named("production".to_string()),
//!     ..Default::default()
//! };
//! let config = load_config(dir.path(), &options).unwrap();
//! assert_eq!(config["db"]["pool"], 50);
//! ```

pub mod environment;
pub mod error;
pub mod format;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod options;
pub mod output;
pub mod path;
pub mod substitution;
pub mod traversal;
pub mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use environment::{process_config, EnvironmentSelection, COMMON_ENVIRONMENTS};
pub use error::{Error, Result};
pub use format::{check_file, prioritize_format_and_load, Format, FormatPriority};
pub use loader::{load_config, load_file_config, ConfigLoader};
pub use logging::{init_logger, LogLevel, Logger};
pub use merge::{deep_merge_config, ConfigMerger};
pub use options::{FileLoadOptions, LoadOptions, LoadOptionsBuilder, OptionsLayer};
pub use output::OutputFormat;
pub use substitution::{PlaceholderSubstitution, ProcessEnv, Substitution, VariableSource};
pub use traversal::{DirectoryMap, ProgressCallback};
pub use value::{ConfigMap, ROOT_KEY};
