//! Option types for the loaders.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentSelection;
use crate::format::FormatPriority;
use crate::traversal::ProgressCallback;

/// Options for loading a directory tree.
///
/// # Examples
///
/// ```
/// use cfgtree::{EnvironmentSelection, LoadOptions};
///
/// let options = LoadOptions {
///     environment: EnvironmentSelection::Named("production".to_string()),
///     max_depth: Some(2),
///     ..Default::default()
/// };
/// assert!(!options.clean_orphan_replaceable);
/// ```
#[derive(Clone, Default)]
pub struct LoadOptions {
    /// Formats tried for each base name, first existing file wins.
    pub format_priority: FormatPriority,
    /// Environment block to select from each file.
    pub environment: EnvironmentSelection,
    /// Strip placeholders that survive substitution.
    pub clean_orphan_replaceable: bool,
    /// Only consider `*.<prefix>.<ext>` files; keys drop the `.<prefix>` part.
    pub convention_prefix: Option<String>,
    /// Levels to descend below the root; `Some(0)` keeps subdirectories empty.
    pub max_depth: Option<usize>,
    /// Progress hook handed to the traversal.
    pub callback: Option<ProgressCallback>,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format_priority", &self.format_priority)
            .field("environment", &self.environment)
            .field("clean_orphan_replaceable", &self.clean_orphan_replaceable)
            .field("convention_prefix", &self.convention_prefix)
            .field("max_depth", &self.max_depth)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Options for loading a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLoadOptions {
    /// Formats tried for the base path, first existing file wins.
    pub format_priority: FormatPriority,
    /// Environment block to select.
    pub environment: EnvironmentSelection,
    /// Strip placeholders that survive substitution.
    pub clean_orphan_replaceable: bool,
}

impl From<&LoadOptions> for FileLoadOptions {
    fn from(options: &LoadOptions) -> Self {
        Self {
            format_priority: options.format_priority.clone(),
            environment: options.environment.clone(),
            clean_orphan_replaceable: options.clean_orphan_replaceable,
        }
    }
}

/// A partial set of options, as read from an options file, the environment
/// or set programmatically. Unset fields leave lower layers untouched.
///
/// Options files use kebab-case keys:
///
/// ```yaml
/// format-priority: [yaml, json]
/// environment: production
/// clean-orphan-replaceable: true
/// max-depth: 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OptionsLayer {
    /// Format priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_priority: Option<FormatPriority>,
    /// Environment name to select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Variable holding the environment name to select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_var: Option<String>,
    /// Strip orphan placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_orphan_replaceable: Option<bool>,
    /// File naming-convention segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convention_prefix: Option<String>,
    /// Maximum traversal depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl OptionsLayer {
    /// Apply the fields set in this layer on top of `options`.
    pub fn apply_to(&self, options: &mut LoadOptions) {
        if let Some(priority) = &self.format_priority {
            options.format_priority = priority.clone();
        }
        if let Some(environment) = &self.environment {
            options.environment = EnvironmentSelection::Named(environment.clone());
        }
        if let Some(var) = &self.environment_var {
            options.environment = EnvironmentSelection::FromVariable(var.clone());
        }
        if let Some(clean) = self.clean_orphan_replaceable {
            options.clean_orphan_replaceable = clean;
        }
        if self.convention_prefix.is_some() {
            options.convention_prefix.clone_from(&self.convention_prefix);
        }
        if self.max_depth.is_some() {
            options.max_depth = self.max_depth;
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
