//! Environment selection and placeholder processing for loaded files.
//!
//! A file may hold one block per environment next to a `default` block:
//!
//! ```yaml
//! default:
//!   pool: 5
//! production:
//!   pool: 50
//! ```
//!
//! When an environment is selected, the named block is deep-merged on top of
//! a copy of `default` and the result replaces the whole file. Every string
//! leaf is then run through placeholder substitution.

use serde_json::Value;

use crate::merge::ConfigMerger;
use crate::substitution::{Substitution, VariableSource};
use crate::value::ConfigMap;

/// Top-level keys that mark a file as environment-keyed.
pub const COMMON_ENVIRONMENTS: [&str; 5] = ["default", "development", "production", "staging", "test"];

/// Which environment block, if any, to select from each loaded file.
///
/// # Examples
///
/// ```
/// use cfgtree::EnvironmentSelection;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("APP_ENV".to_string(), "staging".to_string())]);
///
/// let selection = EnvironmentSelection::FromVariable("APP_ENV".to_string());
/// assert_eq!(selection.resolve(&vars), Some("staging".to_string()));
///
/// let selection = EnvironmentSelection::Named("production".to_string());
/// assert_eq!(selection.resolve(&vars), Some("production".to_string()));
///
/// assert_eq!(EnvironmentSelection::None.resolve(&vars), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnvironmentSelection {
    /// Keep files as they are.
    #[default]
    None,
    /// Select this environment.
    Named(String),
    /// Select the environment named by this variable, read when loading starts.
    FromVariable(String),
}

impl EnvironmentSelection {
    /// Resolve the selection to an environment name.
    ///
    /// An unset or empty variable resolves to `None`.
    #[must_use]
    pub fn resolve(&self, source: &dyn VariableSource) -> Option<String> {
        match self {
            Self::None => None,
            Self::Named(name) => Some(name.clone()).filter(|n| !n.is_empty()),
            Self::FromVariable(var) => source.var(var).filter(|n| !n.is_empty()),
        }
    }
}

/// Applies environment selection and placeholder substitution to a value.
pub struct EnvironmentProcessor<'a> {
    substitution: &'a dyn Substitution,
    clean_orphans: bool,
    environment: Option<String>,
}

impl<'a> EnvironmentProcessor<'a> {
    /// Create a processor.
    ///
    /// `clean_orphans` strips placeholders left after substitution;
    /// `environment` is the block to select, if any.
    #[must_use]
    pub fn new(
        substitution: &'a dyn Substitution,
        clean_orphans: bool,
        environment: Option<String>,
    ) -> Self {
        Self {
            substitution,
            clean_orphans,
            environment,
        }
    }

    /// The selected environment.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Select the environment (when configured) and substitute every string.
    #[must_use]
    pub fn process(&self, raw: Value) -> Value {
        let mut processed = match self.environment.as_deref() {
            Some(environment) => select_environment(raw, environment),
            None => raw,
        };
        self.substitute(&mut processed);
        processed
    }

    fn substitute(&self, value: &mut Value) {
        match value {
            Value::String(s) => {
                let mut replaced = self.substitution.replace_env(s);
                replaced = self.substitution.evaluate(&replaced);
                if self.clean_orphans {
                    replaced = self.substitution.strip_unresolved(&replaced);
                }
                *s = replaced;
            }
            Value::Array(items) => items.iter_mut().for_each(|item| self.substitute(item)),
            Value::Object(map) => map.values_mut().for_each(|item| self.substitute(item)),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}

/// Returns true if `map` should be treated as environment-keyed for `environment`.
///
/// A file is environment-keyed when it has a top-level key equal to the
/// environment, or when the environment is one of [`COMMON_ENVIRONMENTS`]
/// and the file has `default` or another common environment key.
#[must_use]
pub fn is_environment_keyed(map: &ConfigMap, environment: &str) -> bool {
    if map.contains_key(environment) {
        return true;
    }
    COMMON_ENVIRONMENTS.contains(&environment)
        && map
            .keys()
            .any(|key| COMMON_ENVIRONMENTS.contains(&key.as_str()))
}

/// Fold `default` and the `environment` block into one mapping.
///
/// Values that are not environment-keyed mappings are returned unchanged.
///
/// # Examples
///
/// ```
/// use cfgtree::environment::select_environment;
/// use serde_json::json;
///
/// let raw = json!({
///     "default": {"x": 1},
///     "development": {"y": 2},
///     "production": {"y": 3}
/// });
/// assert_eq!(select_environment(raw.clone(), "development"), json!({"x": 1, "y": 2}));
/// assert_eq!(select_environment(raw.clone(), "staging"), json!({"x": 1}));
/// assert_eq!(select_environment(raw.clone(), "qa"), raw);
/// ```
#[must_use]
pub fn select_environment(raw: Value, environment: &str) -> Value {
    let Value::Object(mut map) = raw else {
        return raw;
    };
    if !is_environment_keyed(&map, environment) {
        log::trace!("no environment blocks for '{environment}', keeping file as-is");
        return Value::Object(map);
    }

    let mut selected = match map.remove("default") {
        Some(Value::Object(default)) => default,
        _ => ConfigMap::new(),
    };
    if let Some(Value::Object(block)) = map.get(environment) {
        ConfigMerger::merge_into(&mut selected, block);
    }
    Value::Object(selected)
}

/// Process one loaded file: select `environment` (if any), then substitute.
///
/// # Examples
///
/// ```
/// use cfgtree::environment::process_config;
/// use cfgtree::PlaceholderSubstitution;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("HOST".to_string(), "db.internal".to_string())]);
/// let substitution = PlaceholderSubstitution::new(vars);
/// let raw = json!({"default": {"host": "${HOST}"}, "test": {"pool": "<% 2 * 4 %>"}});
///
/// let processed = process_config(raw, false, Some("test"), &substitution);
/// assert_eq!(processed, json!({"host": "db.internal", "pool": "8"}));
/// ```
#[must_use]
pub fn process_config(
    raw: Value,
    clean_orphans: bool,
    environment: Option<&str>,
    substitution: &dyn Substitution,
) -> Value {
    EnvironmentProcessor::new(substitution, clean_orphans, environment.map(str::to_string))
        .process(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::{MockSubstitution, PlaceholderSubstitution};
    use serde_json::json;
    use std::collections::HashMap;

    fn environments() -> Value {
        json!({
            "default": {"x": 1, "deep": {"value": 1}},
            "development": {"y": 2, "deep": {"test": 3}},
            "production": {"y": 3}
        })
    }

    fn identity_mock() -> MockSubstitution {
        let mut mock = MockSubstitution::new();
        mock.expect_replace_env().returning(str::to_string);
        mock.expect_evaluate().returning(str::to_string);
        mock.expect_strip_unresolved().never();
        mock
    }

    #[test]
    fn test_select_development() {
        assert_eq!(
            select_environment(environments(), "development"),
            json!({"x": 1, "y": 2, "deep": {"value": 1, "test": 3}})
        );
    }

    #[test]
    fn test_select_production() {
        assert_eq!(
            select_environment(environments(), "production"),
            json!({"x": 1, "y": 3, "deep": {"value": 1}})
        );
    }

    #[test]
    fn test_unknown_environment_without_trigger_keys() {
        let raw = json!({"alpha": {"a": 1}, "beta": {"b": 2}});
        assert_eq!(select_environment(raw.clone(), "qa"), raw);
        assert_eq!(select_environment(raw.clone(), "production"), raw);
    }

    #[test]
    fn test_uncommon_absent_environment_leaves_file_unmerged() {
        assert_eq!(select_environment(environments(), "qa"), environments());
    }

    #[test]
    fn test_common_absent_environment_yields_default() {
        assert_eq!(
            select_environment(environments(), "staging"),
            json!({"x": 1, "deep": {"value": 1}})
        );
    }

    #[test]
    fn test_exact_environment_key_triggers() {
        let raw = json!({"qa": {"a": 1}, "other": {"b": 2}});
        assert_eq!(select_environment(raw, "qa"), json!({"a": 1}));
    }

    #[test]
    fn test_common_name_triggers_without_default() {
        let raw = json!({"staging": {"replicas": 2}, "name": "svc"});
        assert_eq!(select_environment(raw, "production"), json!({}));
    }

    #[test]
    fn test_scalar_and_array_files_pass_through() {
        assert_eq!(select_environment(json!([1, 2]), "test"), json!([1, 2]));
        assert_eq!(select_environment(json!("text"), "test"), json!("text"));
    }

    #[test]
    fn test_non_mapping_environment_block_is_ignored() {
        let raw = json!({"default": {"x": 1}, "test": "oops"});
        assert_eq!(select_environment(raw, "test"), json!({"x": 1}));
    }

    #[test]
    fn test_process_without_environment_keeps_structure() {
        let mock = identity_mock();
        let processor = EnvironmentProcessor::new(&mock, false, None);
        assert_eq!(processor.process(environments()), environments());
    }

    #[test]
    fn test_substitution_visits_nested_strings_only() {
        let mut mock = MockSubstitution::new();
        mock.expect_replace_env()
            .times(3)
            .returning(|s| s.to_uppercase());
        mock.expect_evaluate().times(3).returning(str::to_string);
        mock.expect_strip_unresolved()
            .times(3)
            .returning(|s| format!("{s}!"));

        let processor = EnvironmentProcessor::new(&mock, true, None);
        let processed = processor.process(json!({
            "name": "svc",
            "ports": [80, "http"],
            "nested": {"flag": true, "label": "x", "none": null}
        }));
        assert_eq!(
            processed,
            json!({
                "name": "SVC!",
                "ports": [80, "HTTP!"],
                "nested": {"flag": true, "label": "X!", "none": null}
            })
        );
    }

    #[test]
    fn test_process_selects_then_substitutes() {
        let vars = HashMap::from([("APP_ENV".to_string(), "test".to_string())]);
        let subst = PlaceholderSubstitution::new(vars);
        let raw = json!({
            "default": {"env": "{{ APP_ENV }}", "other": "{{ OTHER }}"},
            "development": {"port": "<% 4000 + 1 %>"}
        });

        let processor = EnvironmentProcessor::new(&subst, false, Some("development".to_string()));
        assert_eq!(processor.environment(), Some("development"));
        assert_eq!(
            processor.process(raw.clone()),
            json!({"env": "test", "other": "{{ OTHER }}", "port": "4001"})
        );

        let cleaning = EnvironmentProcessor::new(&subst, true, Some("development".to_string()));
        assert_eq!(
            cleaning.process(raw),
            json!({"env": "test", "other": "", "port": "4001"})
        );
    }

    #[test]
    fn test_process_config_without_environment() {
        let vars = HashMap::from([("NAME".to_string(), "svc".to_string())]);
        let subst = PlaceholderSubstitution::new(vars);
        let raw = json!({"default": {"name": "${NAME}"}, "list": ["${MISSING}"]});
        assert_eq!(
            process_config(raw, true, None, &subst),
            json!({"default": {"name": "svc"}, "list": [""]})
        );
    }

    #[test]
    fn test_selection_resolve() {
        let vars = HashMap::from([("EMPTY".to_string(), String::new())]);
        assert_eq!(EnvironmentSelection::FromVariable("EMPTY".into()).resolve(&vars), None);
        assert_eq!(EnvironmentSelection::FromVariable("UNSET".into()).resolve(&vars), None);
        assert_eq!(EnvironmentSelection::Named(String::new()).resolve(&vars), None);
    }
}
