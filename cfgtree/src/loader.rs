//! Directory and single-file configuration loading.
//!
//! A directory tree maps onto a nested configuration object: every file
//! becomes a key named after its base name, every subdirectory a nested
//! object. When a file and a subdirectory share a name, the file's value is
//! kept under `__root` inside the directory's object.
//!
//! ```text
//! conf/
//!   app.json          -> { "app": {...},
//!   db.yaml           ->   "db": { "__root": {...},
//!   db/replica.yml    ->           "replica": {...} } }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::environment::EnvironmentProcessor;
use crate::error::Result;
use crate::format::{prioritize_format_and_load, Format};
use crate::options::{FileLoadOptions, LoadOptions};
use crate::path;
use crate::substitution::{PlaceholderSubstitution, ProcessEnv, Substitution, VariableSource};
use crate::traversal::{traverse, DirectoryMap, FileFilter, TraversalOptions};
use crate::value::{ConfigMap, ROOT_KEY};

/// Loads configuration with an injected substitution engine and variable source.
///
/// # Examples
///
/// ```
/// use cfgtree::{ConfigLoader, LoadOptions, PlaceholderSubstitution};
/// use std::collections::HashMap;
/// use std::fs;
///
/// let dir = tempfile::tempdir().unwrap();
/// fs::write(dir.path().join("app.yaml"), "name: ${APP_NAME}\n").unwrap();
///
/// let vars = HashMap::from([("APP_NAME".to_string(), "billing".to_string())]);
/// let substitution = PlaceholderSubstitution::new(vars.clone());
/// let loader = ConfigLoader::new(&substitution, &vars);
///
/// let config = loader.load_config(dir.path(), &LoadOptions::default()).unwrap();
/// assert_eq!(config["app"]["name"], "billing");
/// ```
pub struct ConfigLoader<'a> {
    substitution: &'a dyn Substitution,
    variables: &'a dyn VariableSource,
}

impl<'a> ConfigLoader<'a> {
    /// Create a loader.
    ///
    /// `variables` is only consulted to resolve
    /// [`EnvironmentSelection::FromVariable`](crate::EnvironmentSelection::FromVariable);
    /// placeholders are resolved by `substitution`.
    #[must_use]
    pub fn new(substitution: &'a dyn Substitution, variables: &'a dyn VariableSource) -> Self {
        Self {
            substitution,
            variables,
        }
    }

    /// Load every configuration file under `root` into one nested mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory, a directory cannot be
    /// listed, or any file fails to read or parse. No partial result is
    /// returned.
    pub fn load_config(&self, root: &Path, options: &LoadOptions) -> Result<ConfigMap> {
        let root = path::normalize(root)?;
        let environment = options.environment.resolve(self.variables);
        log::debug!(
            "loading configuration tree {} (environment: {})",
            root.display(),
            environment.as_deref().unwrap_or("<none>")
        );

        let processor =
            EnvironmentProcessor::new(self.substitution, options.clean_orphan_replaceable, environment);
        let traversal = TraversalOptions {
            filter: file_filter(options.convention_prefix.as_deref()),
            max_depth: options.max_depth,
            progress: options.callback.clone(),
        };
        let tree = traverse(&root, &traversal)?;

        self.load_level(&tree, options, &processor)
    }

    /// Load the highest-priority file for `base` (a path without extension).
    ///
    /// Returns `Ok(None)` when no file exists for any format in the priority.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the file found cannot be
    /// read or parsed.
    pub fn load_file_config(&self, base: &Path, options: &FileLoadOptions) -> Result<Option<Value>> {
        let base = path::normalize(base)?;
        let Some(raw) = prioritize_format_and_load(&base, &options.format_priority)? else {
            log::debug!("no configuration file for {}", base.display());
            return Ok(None);
        };

        let environment = options.environment.resolve(self.variables);
        let processor =
            EnvironmentProcessor::new(self.substitution, options.clean_orphan_replaceable, environment);
        Ok(Some(processor.process(raw)))
    }

    fn load_level(
        &self,
        level: &DirectoryMap,
        options: &LoadOptions,
        processor: &EnvironmentProcessor<'_>,
    ) -> Result<ConfigMap> {
        let prefix = options.convention_prefix.as_deref();
        let mut section = ConfigMap::new();
        let mut names_used = HashSet::new();

        for file in &level.files {
            let Some(base) = base_name(file, prefix) else {
                log::debug!("skipping file with unusable name {}", file.display());
                continue;
            };
            if !names_used.insert(base.clone()) {
                continue;
            }

            let base_path = match prefix {
                Some(prefix) => level.path.join(format!("{base}.{prefix}")),
                None => level.path.join(&base),
            };
            if let Some(raw) = prioritize_format_and_load(&base_path, &options.format_priority)? {
                section.insert(base, processor.process(raw));
            }
        }

        for directory in &level.directories {
            let Some(name) = directory.name() else {
                log::debug!("skipping directory with non-UTF-8 name {}", directory.path.display());
                continue;
            };

            let mut node = ConfigMap::new();
            if let Some(previous) = section.remove(name) {
                log::trace!("'{name}' is both a file and a directory, keeping file under {ROOT_KEY}");
                node.insert(ROOT_KEY.to_string(), previous);
            }
            node.extend(self.load_level(directory, options, processor)?);
            section.insert(name.to_string(), Value::Object(node));
        }

        Ok(section)
    }
}

/// Load a directory tree using the process environment.
///
/// # Errors
///
/// See [`ConfigLoader::load_config`].
///
/// # Examples
///
/// ```no_run
/// use cfgtree::{load_config, LoadOptions};
/// use std::path::Path;
///
/// let config = load_config(Path::new("./config"), &LoadOptions::default()).unwrap();
/// println!("{}", serde_json::to_string_pretty(&config).unwrap());
/// ```
pub fn load_config(root: &Path, options: &LoadOptions) -> Result<ConfigMap> {
    let substitution = PlaceholderSubstitution::new(ProcessEnv);
    ConfigLoader::new(&substitution, &ProcessEnv).load_config(root, options)
}

/// Load a single configuration file using the process environment.
///
/// # Errors
///
/// See [`ConfigLoader::load_file_config`].
pub fn load_file_config(base: &Path, options: &FileLoadOptions) -> Result<Option<Value>> {
    let substitution = PlaceholderSubstitution::new(ProcessEnv);
    ConfigLoader::new(&substitution, &ProcessEnv).load_file_config(base, options)
}

fn file_filter(prefix: Option<&str>) -> FileFilter {
    let extensions = Format::ALL
        .iter()
        .map(|format| format.extension().to_string())
        .collect();
    match prefix {
        Some(prefix) => FileFilter::Convention {
            prefix: prefix.to_string(),
            extensions,
        },
        None => FileFilter::Extensions(extensions),
    }
}

/// The key a file is stored under: its name without the final extension,
/// and without `.<prefix>` when a convention prefix is set.
fn base_name(file: &Path, prefix: Option<&str>) -> Option<String> {
    let stem = file.file_stem()?.to_str()?;
    match prefix {
        Some(prefix) => stem
            .strip_suffix(prefix)
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|rest| !rest.is_empty())
            .map(str::to_string),
        None => Some(stem.to_string()),
    }
}
