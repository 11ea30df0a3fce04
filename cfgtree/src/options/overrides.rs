//! `CFGTREE_*` environment variable overrides for loader options.

use crate::error::{Error, Result};
use crate::options::schema::OptionsLayer;
use crate::substitution::VariableSource;

/// Comma-separated format priority, e.g. `yaml,json`.
pub const FORMAT_PRIORITY_ENV: &str = "CFGTREE_FORMAT_PRIORITY";
/// Environment name to select.
pub const ENVIRONMENT_ENV: &str = "CFGTREE_ENVIRONMENT";
/// Variable naming the environment to select.
pub const ENVIRONMENT_VAR_ENV: &str = "CFGTREE_ENVIRONMENT_VAR";
/// Maximum traversal depth.
pub const MAX_DEPTH_ENV: &str = "CFGTREE_MAX_DEPTH";
/// File naming-convention segment.
pub const CONVENTION_PREFIX_ENV: &str = "CFGTREE_CONVENTION_PREFIX";
/// Strip orphan placeholders (boolean).
pub const CLEAN_ORPHANS_ENV: &str = "CFGTREE_CLEAN_ORPHANS";

/// Every variable read by [`EnvironmentOverrides`].
pub const ALL_OVERRIDE_VARS: [&str; 6] = [
    FORMAT_PRIORITY_ENV,
    ENVIRONMENT_ENV,
    ENVIRONMENT_VAR_ENV,
    MAX_DEPTH_ENV,
    CONVENTION_PREFIX_ENV,
    CLEAN_ORPHANS_ENV,
];

/// Reads option overrides from environment variables.
///
/// # Examples
///
/// ```
/// use cfgtree::options::EnvironmentOverrides;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([
///     ("CFGTREE_MAX_DEPTH".to_string(), "2".to_string()),
///     ("CFGTREE_CLEAN_ORPHANS".to_string(), "yes".to_string()),
/// ]);
/// let layer = EnvironmentOverrides::read(&vars).unwrap();
/// assert_eq!(layer.max_depth, Some(2));
/// assert_eq!(layer.clean_orphan_replaceable, Some(true));
/// ```
pub struct EnvironmentOverrides;

impl EnvironmentOverrides {
    /// Build an options layer from the variables in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a variable holds an invalid value
    /// (unknown format, non-numeric depth, invalid boolean).
    pub fn read(source: &dyn VariableSource) -> Result<OptionsLayer> {
        let mut layer = OptionsLayer::default();

        if let Some(priority) = source.var(FORMAT_PRIORITY_ENV) {
            layer.format_priority = Some(priority.parse().map_err(|e: Error| Error::Validation {
                field: FORMAT_PRIORITY_ENV.into(),
                message: e.to_string(),
            })?);
        }

        layer.environment = source.var(ENVIRONMENT_ENV);
        layer.environment_var = source.var(ENVIRONMENT_VAR_ENV);
        layer.convention_prefix = source.var(CONVENTION_PREFIX_ENV);

        if let Some(depth) = source.var(MAX_DEPTH_ENV) {
            layer.max_depth = Some(depth.trim().parse().map_err(|_| Error::Validation {
                field: MAX_DEPTH_ENV.into(),
                message: "Must be a non-negative integer".into(),
            })?);
        }

        if let Some(val) = source.var(CLEAN_ORPHANS_ENV) {
            layer.clean_orphan_replaceable = Some(Self::parse_bool(CLEAN_ORPHANS_ENV, &val)?);
        }

        Ok(layer)
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
