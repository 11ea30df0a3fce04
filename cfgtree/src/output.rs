//! Rendering of loaded configuration.

use std::fmt;

use clap::ValueEnum;
use serde_json::Value;

use crate::error::{Error, Result};

/// Available output formats for loaded configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Render `value` in this format, always ending with a newline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the serializer fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::OutputFormat;
    /// use serde_json::json;
    ///
    /// let rendered = OutputFormat::Yaml.render(&json!({"port": 80})).unwrap();
    /// assert_eq!(rendered, "port: 80\n");
    /// ```
    pub fn render(self, value: &Value) -> Result<String> {
        let mut rendered = match self {
            Self::Json => {
                serde_json::to_string_pretty(value).map_err(|e| Error::Serialization(e.to_string()))?
            }
            Self::Yaml => {
                serde_yaml::to_string(value).map_err(|e| Error::Serialization(e.to_string()))?
            }
        };
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}
