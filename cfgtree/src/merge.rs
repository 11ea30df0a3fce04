//! Deep merging of configuration mappings.
//!
//! Mappings merge key by key, recursively. Every other value, arrays
//! included, replaces whatever the target held at that key.

use serde_json::Value;

use crate::value::ConfigMap;

/// Merges configuration mappings with later sources taking precedence.
///
/// # Examples
///
/// ```
/// use cfgtree::ConfigMerger;
/// use serde_json::json;
///
/// let mut target = json!({"db": {"host": "localhost", "port": 5432}});
/// let source = json!({"db": {"port": 6432}, "debug": true});
///
/// ConfigMerger::merge_into(
///     target.as_object_mut().unwrap(),
///     source.as_object().unwrap(),
/// );
/// assert_eq!(target, json!({"db": {"host": "localhost", "port": 6432}, "debug": true}));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge a sequence of mappings into a fresh one.
    ///
    /// Sources are applied from first to last, so the last one wins on
    /// conflicting scalar keys.
    #[must_use]
    pub fn merge<I>(sources: I) -> ConfigMap
    where
        I: IntoIterator<Item = ConfigMap>,
    {
        let mut result = ConfigMap::new();
        for source in sources {
            Self::merge_into(&mut result, &source);
        }
        result
    }

    /// Merge `source` into `target` (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Source mapping: target gets a mapping at that key (a fresh one if the
    ///   key is absent or holds a non-mapping) and the merge recurses.
    /// - Anything else, arrays included: assigned as-is.
    pub fn merge_into(target: &mut ConfigMap, source: &ConfigMap) {
        for (key, value) in source {
            match value {
                Value::Object(source_map) => {
                    let slot = target
                        .entry(key.clone())
                        .or_insert_with(|| Value::Object(ConfigMap::new()));
                    if !slot.is_object() {
                        *slot = Value::Object(ConfigMap::new());
                    }
                    if let Value::Object(target_map) = slot {
                        Self::merge_into(target_map, source_map);
                    }
                }
                other => {
                    target.insert(key.clone(), other.clone());
                }
            }
        }
    }
}

/// Deep-merge every source into `target`, left to right, and return it.
///
/// With no sources the target is returned unchanged.
///
/// # Examples
///
/// ```
/// use cfgtree::deep_merge_config;
/// use serde_json::json;
///
/// let mut target = json!({"a": {"b": {"c": 1}}});
/// let first = json!({"a": {"b": {"d": 2}}});
/// let second = json!({"a": {"b": {"e": 3}}});
///
/// deep_merge_config(
///     target.as_object_mut().unwrap(),
///     [first.as_object().unwrap(), second.as_object().unwrap()],
/// );
/// assert_eq!(target, json!({"a": {"b": {"c": 1, "d": 2, "e": 3}}}));
/// ```
pub fn deep_merge_config<'t, 's, I>(target: &'t mut ConfigMap, sources: I) -> &'t mut ConfigMap
where
    I: IntoIterator<Item = &'s ConfigMap>,
{
    for source in sources {
        ConfigMerger::merge_into(target, source);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ConfigMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_merges_two_or_more_deeply() {
        let mut target = map(json!({"a": {"b": {"c": 1}}}));
        let sources = [map(json!({"a": {"b": {"d": 2}}})), map(json!({"a": {"b": {"e": 3}}}))];

        deep_merge_config(&mut target, &sources);
        assert_eq!(Value::Object(target), json!({"a": {"b": {"c": 1, "d": 2, "e": 3}}}));
    }

    #[test]
    fn test_no_sources_returns_target_unchanged() {
        let mut target = map(json!({"keep": [1, 2]}));
        let merged = deep_merge_config(&mut target, std::iter::empty::<&ConfigMap>()).clone();
        assert_eq!(Value::Object(merged), json!({"keep": [1, 2]}));
    }

    #[test]
    fn test_arrays_are_replaced_not_merged() {
        let mut target = map(json!({"hosts": ["a", "b", "c"]}));
        ConfigMerger::merge_into(&mut target, &map(json!({"hosts": ["z"]})));
        assert_eq!(target["hosts"], json!(["z"]));
    }

    #[test]
    fn test_creates_missing_branches() {
        let mut target = ConfigMap::new();
        ConfigMerger::merge_into(&mut target, &map(json!({"a": {"b": {"c": true}}})));
        assert_eq!(Value::Object(target), json!({"a": {"b": {"c": true}}}));
    }

    #[test]
    fn test_mapping_replaces_scalar_or_null() {
        let mut target = map(json!({"a": null, "b": "text", "c": 0}));
        let source = map(json!({"a": {"x": 1}, "b": {"y": 2}, "c": {"z": 3}}));
        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(
            Value::Object(target),
            json!({"a": {"x": 1}, "b": {"y": 2}, "c": {"z": 3}})
        );
    }

    #[test]
    fn test_scalar_overwrites_mapping() {
        let mut target = map(json!({"a": {"deep": true}}));
        ConfigMerger::merge_into(&mut target, &map(json!({"a": false})));
        assert_eq!(target["a"], json!(false));
    }

    #[test]
    fn test_null_in_source_overwrites() {
        let mut target = map(json!({"a": 1}));
        ConfigMerger::merge_into(&mut target, &map(json!({"a": null})));
        assert_eq!(target["a"], Value::Null);
    }

    #[test]
    fn test_merge_sequence_last_wins() {
        let result = ConfigMerger::merge(vec![
            map(json!({"level": "low", "shared": {"a": 1}})),
            map(json!({"level": "mid", "shared": {"b": 2}})),
            map(json!({"level": "high"})),
        ]);
        assert_eq!(
            Value::Object(result),
            json!({"level": "high", "shared": {"a": 1, "b": 2}})
        );
    }

    #[test]
    fn test_source_is_not_mutated() {
        let mut target = ConfigMap::new();
        let source = map(json!({"nested": {"v": 1}}));
        ConfigMerger::merge_into(&mut target, &source);
        if let Some(Value::Object(nested)) = target.get_mut("nested") {
            nested.insert("w".to_string(), json!(2));
        }
        assert_eq!(Value::Object(source), json!({"nested": {"v": 1}}));
    }
}
