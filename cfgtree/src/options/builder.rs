//! Layered assembly of [`LoadOptions`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::overrides::EnvironmentOverrides;
use crate::options::schema::{LoadOptions, OptionsLayer};
use crate::options::validator::OptionsValidator;
use crate::substitution::{ProcessEnv, VariableSource};
use crate::traversal::ProgressCallback;

/// Builds [`LoadOptions`] from defaults, an options file, `CFGTREE_*`
/// variables and programmatic layers, in that order of increasing precedence.
///
/// # Examples
///
/// ```
/// use cfgtree::options::{LoadOptionsBuilder, OptionsLayer};
///
/// let options = LoadOptionsBuilder::new()
///     .skip_env()
///     .with_layer(OptionsLayer {
///         max_depth: Some(1),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(options.max_depth, Some(1));
/// ```
pub struct LoadOptionsBuilder {
    options_file: Option<PathBuf>,
    skip_env: bool,
    variables: Option<Box<dyn VariableSource>>,
    layers: Vec<OptionsLayer>,
    callback: Option<ProgressCallback>,
}

impl Default for LoadOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadOptionsBuilder {
    /// Create a builder starting from default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options_file: None,
            skip_env: false,
            variables: None,
            layers: Vec::new(),
            callback: None,
        }
    }

    /// Read a YAML options file as the lowest non-default layer.
    #[must_use]
    pub fn with_options_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options_file = Some(path.into());
        self
    }

    /// Ignore `CFGTREE_*` variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Read overrides from `source` instead of the process environment.
    #[must_use]
    pub fn with_variables(mut self, source: impl VariableSource + 'static) -> Self {
        self.variables = Some(Box::new(source));
        self
    }

    /// Add a programmatic layer. Later layers win.
    #[must_use]
    pub fn with_layer(mut self, layer: OptionsLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set the traversal progress hook.
    #[must_use]
    pub fn with_callback(mut self, callback: ProgressCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Assemble and validate the options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options file cannot be read or parsed, a
    /// variable or layer holds an invalid value, or the final options fail
    /// validation.
    pub fn build(self) -> Result<LoadOptions> {
        let mut options = LoadOptions::default();

        if let Some(path) = &self.options_file {
            let layer = Self::read_options_file(path)?;
            OptionsValidator::validate_layer(&layer)?;
            log::debug!("applying options file {}", path.display());
            layer.apply_to(&mut options);
        }

        if !self.skip_env {
            let layer = match &self.variables {
                Some(source) => EnvironmentOverrides::read(source.as_ref())?,
                None => EnvironmentOverrides::read(&ProcessEnv)?,
            };
            if !layer.is_empty() {
                OptionsValidator::validate_layer(&layer)?;
                log::debug!("applying environment overrides: {layer:?}");
                layer.apply_to(&mut options);
            }
        }

        for layer in &self.layers {
            OptionsValidator::validate_layer(layer)?;
            layer.apply_to(&mut options);
        }

        options.callback = self.callback;
        OptionsValidator::validate(&options)?;
        Ok(options)
    }

    /// Parse an options file. An empty file is an empty layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::OptionsFile`] if it is not a valid options document.
    pub fn read_options_file(path: &Path) -> Result<OptionsLayer> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(OptionsLayer::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| Error::OptionsFile {
            path: path.to_path_buf(),
            source,
        })
    }
}
