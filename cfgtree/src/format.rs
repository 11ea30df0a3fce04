//! File formats and priority-based resolution.
//!
//! A configuration entry is addressed by a base path without extension.
//! [`prioritize_format_and_load`] tries `base.<ext>` for every format in
//! priority order and parses the first file that exists.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::value;

/// A configuration file format, named after its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml`
    Yaml,
    /// `.yml`
    Yml,
}

impl Format {
    /// Every supported format, in default priority order.
    pub const ALL: [Self; 3] = [Self::Json, Self::Yaml, Self::Yml];

    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Yml => "yml",
        }
    }

    /// Parse file contents in this format.
    ///
    /// # Errors
    ///
    /// Returns the parser's diagnostic message on malformed input.
    pub fn parse(self, text: &str) -> std::result::Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Yaml | Self::Yml => {
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(text).map_err(|e| e.to_string())?;
                value::from_yaml(yaml)
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "yml" => Ok(Self::Yml),
            _ => Err(Error::UnknownFormat { tag: s.to_string() }),
        }
    }
}

/// Ordered list of formats; the first existing file wins.
///
/// # Examples
///
/// ```
/// use cfgtree::{Format, FormatPriority};
///
/// let priority: FormatPriority = "yaml, json".parse().unwrap();
/// assert_eq!(&*priority, &[Format::Yaml, Format::Json]);
/// assert_eq!(&*FormatPriority::default(), &Format::ALL);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatPriority(Vec<Format>);

impl FormatPriority {
    /// Create a priority list from formats in the given order.
    #[must_use]
    pub fn new(formats: Vec<Format>) -> Self {
        Self(formats)
    }

    /// The formats in priority order.
    #[must_use]
    pub fn formats(&self) -> &[Format] {
        &self.0
    }
}

impl Default for FormatPriority {
    fn default() -> Self {
        Self(Format::ALL.to_vec())
    }
}

impl Deref for FormatPriority {
    type Target = [Format];

    fn deref(&self) -> &[Format] {
        &self.0
    }
}

impl From<Vec<Format>> for FormatPriority {
    fn from(formats: Vec<Format>) -> Self {
        Self(formats)
    }
}

impl FromStr for FormatPriority {
    type Err = Error;

    /// Parses a comma-separated list such as `yaml,json`.
    fn from_str(s: &str) -> Result<Self> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for FormatPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.0.iter().map(|format| format.extension()).collect();
        f.write_str(&tags.join(","))
    }
}

/// Returns the resolved path of `path` if it names an existing regular file.
///
/// Missing and inaccessible paths both yield `None`.
#[must_use]
pub fn check_file(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok().filter(|resolved| resolved.is_file())
}

/// Appends `.<ext>` to a base path without touching dots already in it.
pub(crate) fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Load the highest-priority file that exists for `base`.
///
/// Resolution stops at the first existing file, even when parsing it fails.
/// Returns `Ok(None)` when no format matches.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed contents (the message names the
/// resolved file) and [`Error::Io`] when an existing file cannot be read.
///
/// # Examples
///
/// ```
/// use cfgtree::{prioritize_format_and_load, Format};
/// use std::path::Path;
///
/// let loaded = prioritize_format_and_load(Path::new("/definitely/missing"), &Format::ALL).unwrap();
/// assert!(loaded.is_none());
/// ```
pub fn prioritize_format_and_load(base: &Path, priority: &[Format]) -> Result<Option<Value>> {
    for format in priority {
        let candidate = with_extension(base, format.extension());
        let Some(resolved) = check_file(&candidate) else {
            continue;
        };

        log::debug!("loading {} as {format}", resolved.display());
        let contents = fs::read_to_string(&resolved).map_err(|source| Error::Io {
            path: resolved.clone(),
            source,
        })?;
        let parsed = format.parse(&contents).map_err(|message| Error::Parse {
            message,
            path: resolved,
        })?;
        return Ok(Some(parsed));
    }

    log::trace!("no file found for {}", base.display());
    Ok(None)
}
