//! Property-based tests for deep merging and environment selection.

use crate::environment::select_environment;
use crate::merge::{deep_merge_config, ConfigMerger};
use crate::value::ConfigMap;
use proptest::prelude::*;
use serde_json::Value;

// Strategy for generating scalar leaves
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

// Strategy for generating nested values; small key alphabet so keys collide
fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-e]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn map_strategy() -> impl Strategy<Value = ConfigMap> {
    prop::collection::btree_map("[a-e]", value_strategy(), 0..5)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Empty mapping is identity element for merge
    #[test]
    fn merge_identity(config in map_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &ConfigMap::new());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = ConfigMap::new();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    // Merging a mapping into itself changes nothing
    #[test]
    fn merge_idempotent_on_self(config in map_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Later sources win on non-mapping values; keys only in the target survive
    #[test]
    fn merge_later_source_wins(low in map_strategy(), high in map_strategy()) {
        let mut merged = low.clone();
        deep_merge_config(&mut merged, [&high]);

        for (key, value) in &high {
            if !value.is_object() {
                prop_assert_eq!(&merged[key], value);
            } else {
                prop_assert!(merged[key].is_object());
            }
        }
        for (key, value) in &low {
            if !high.contains_key(key) {
                prop_assert_eq!(&merged[key], value);
            }
        }
    }

    // Merging several sources equals merging them one at a time
    #[test]
    fn merge_sources_left_to_right(
        target in map_strategy(),
        first in map_strategy(),
        second in map_strategy()
    ) {
        let mut all_at_once = target.clone();
        deep_merge_config(&mut all_at_once, [&first, &second]);

        let mut stepwise = target;
        ConfigMerger::merge_into(&mut stepwise, &first);
        ConfigMerger::merge_into(&mut stepwise, &second);

        prop_assert_eq!(all_at_once, stepwise);
    }

    // Default values survive unless the selected block overrides them
    #[test]
    fn select_environment_keeps_default_values(
        default in map_strategy(),
        block in map_strategy()
    ) {
        let mut raw = ConfigMap::new();
        raw.insert("default".to_string(), Value::Object(default.clone()));
        raw.insert("test".to_string(), Value::Object(block.clone()));

        let selected = select_environment(Value::Object(raw), "test");
        let Value::Object(selected) = selected else {
            return Err(TestCaseError::fail("selection must yield a mapping"));
        };

        for (key, value) in &default {
            if !block.contains_key(key) {
                prop_assert_eq!(&selected[key], value);
            }
        }
        for (key, value) in &block {
            if !value.is_object() {
                prop_assert_eq!(&selected[key], value);
            }
        }
    }
}
