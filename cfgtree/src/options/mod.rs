//! Loader options.
//!
//! Options are assembled from several layers, highest precedence first:
//!
//! 1. Programmatic layers (via `LoadOptionsBuilder::with_layer`)
//! 2. Environment variables (`CFGTREE_*`)
//! 3. An options file (`--options` on the command line)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use cfgtree::options::{LoadOptionsBuilder, OptionsLayer};
//! use cfgtree::{EnvironmentSelection, Format, FormatPriority};
//!
//! let options = LoadOptionsBuilder::new()
//!     .skip_env()
//!     .with_layer(OptionsLayer {
//!         format_priority: Some(FormatPriority::new(vec![Format::Yaml, Format::Json])),
//!         environment: Some("production".to_string()),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.environment, EnvironmentSelection::Named("production".to_string()));
//! ```

pub mod builder;
pub mod overrides;
pub mod schema;
pub mod validator;

pub use builder::LoadOptionsBuilder;
pub use overrides::EnvironmentOverrides;
pub use schema::{FileLoadOptions, LoadOptions, OptionsLayer};
pub use validator::OptionsValidator;
