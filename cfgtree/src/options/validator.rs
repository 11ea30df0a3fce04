//! Validation of loader options.

use std::collections::HashSet;

use crate::environment::EnvironmentSelection;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::options::schema::{LoadOptions, OptionsLayer};

/// Validates option layers and assembled options.
///
/// # Examples
///
/// ```
/// use cfgtree::options::OptionsValidator;
/// use cfgtree::LoadOptions;
///
/// assert!(OptionsValidator::validate(&LoadOptions::default()).is_ok());
///
/// let bad = LoadOptions {
///     convention_prefix: Some("a.b".to_string()),
///     ..Default::default()
/// };
/// assert!(OptionsValidator::validate(&bad).is_err());
/// ```
pub struct OptionsValidator;

impl OptionsValidator {
    /// Validate a single layer before it is applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field.
    pub fn validate_layer(layer: &OptionsLayer) -> Result<()> {
        if layer.environment.is_some() && layer.environment_var.is_some() {
            return Err(Self::error(
                "environment",
                "environment and environment-var are mutually exclusive",
            ));
        }
        if let Some(priority) = &layer.format_priority {
            Self::validate_priority(priority)?;
        }
        if let Some(environment) = &layer.environment {
            Self::validate_environment_name(environment)?;
        }
        if let Some(var) = &layer.environment_var {
            Self::validate_variable_name(var)?;
        }
        if let Some(prefix) = &layer.convention_prefix {
            Self::validate_prefix(prefix)?;
        }
        Ok(())
    }

    /// Validate fully assembled options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first invalid field.
    pub fn validate(options: &LoadOptions) -> Result<()> {
        Self::validate_priority(&options.format_priority)?;
        match &options.environment {
            EnvironmentSelection::None => {}
            EnvironmentSelection::Named(name) => Self::validate_environment_name(name)?,
            EnvironmentSelection::FromVariable(var) => Self::validate_variable_name(var)?,
        }
        if let Some(prefix) = &options.convention_prefix {
            Self::validate_prefix(prefix)?;
        }
        Ok(())
    }

    fn validate_priority(priority: &[Format]) -> Result<()> {
        if priority.is_empty() {
            return Err(Self::error("format_priority", "must list at least one format"));
        }
        let mut seen = HashSet::new();
        for format in priority {
            if !seen.insert(format) {
                return Err(Self::error(
                    "format_priority",
                    &format!("format '{format}' listed more than once"),
                ));
            }
        }
        Ok(())
    }

    fn validate_environment_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Self::error("environment", "must not be empty"));
        }
        Ok(())
    }

    fn validate_variable_name(var: &str) -> Result<()> {
        let mut chars = var.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(Self::error(
                "environment_var",
                &format!("'{var}' is not a valid variable name"),
            ));
        }
        Ok(())
    }

    fn validate_prefix(prefix: &str) -> Result<()> {
        if prefix.is_empty() {
            return Err(Self::error("convention_prefix", "must not be empty"));
        }
        if prefix.contains(['.', '/', '\\']) {
            return Err(Self::error(
                "convention_prefix",
                "must not contain '.' or path separators",
            ));
        }
        Ok(())
    }

    fn error(field: &str, message: &str) -> Error {
        Error::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatPriority;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_options_are_valid() {
        assert!(OptionsValidator::validate(&LoadOptions::default()).is_ok());
        assert!(OptionsValidator::validate_layer(&OptionsLayer::default()).is_ok());
    }

    #[test]
    fn test_empty_priority() {
        let options = LoadOptions {
            format_priority: FormatPriority::new(vec![]),
            ..Default::default()
        };
        assert_eq!(field_of(OptionsValidator::validate(&options)), "format_priority");
    }

    #[test]
    fn test_duplicate_priority() {
        let layer = OptionsLayer {
            format_priority: Some(FormatPriority::new(vec![Format::Json, Format::Json])),
            ..Default::default()
        };
        assert_eq!(field_of(OptionsValidator::validate_layer(&layer)), "format_priority");
    }

    #[test]
    fn test_environment_and_variable_are_exclusive() {
        let layer = OptionsLayer {
            environment: Some("test".to_string()),
            environment_var: Some("APP_ENV".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(OptionsValidator::validate_layer(&layer)), "environment");
    }

    #[test]
    fn test_variable_names() {
        for bad in ["", "1ENV", "APP-ENV", "APP ENV"] {
            let options = LoadOptions {
                environment: EnvironmentSelection::FromVariable(bad.to_string()),
                ..Default::default()
            };
            assert_eq!(field_of(OptionsValidator::validate(&options)), "environment_var");
        }
        let options = LoadOptions {
            environment: EnvironmentSelection::FromVariable("_APP_ENV2".to_string()),
            ..Default::default()
        };
        assert!(OptionsValidator::validate(&options).is_ok());
    }

    #[test]
    fn test_blank_environment_name() {
        let options = LoadOptions {
            environment: EnvironmentSelection::Named("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(OptionsValidator::validate(&options)), "environment");
    }

    #[test]
    fn test_prefixes() {
        for bad in ["", "a.b", "a/b"] {
            let layer = OptionsLayer {
                convention_prefix: Some(bad.to_string()),
                ..Default::default()
            };
            assert_eq!(field_of(OptionsValidator::validate_layer(&layer)), "convention_prefix");
        }
    }
}
