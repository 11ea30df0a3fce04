//! The configuration value model.
//!
//! Every parsed file becomes a [`serde_json::Value`], a tagged variant of
//! Null, Bool, Number, String, Array and Object. Objects are key-sorted maps,
//! so two loads of the same tree serialize identically.

use serde_json::{Map, Number, Value};

/// A nested configuration mapping.
pub type ConfigMap = Map<String, Value>;

/// Key under which a file's value is kept when a same-named subdirectory
/// turns that key into a section.
pub const ROOT_KEY: &str = "__root";

/// Converts a parsed YAML document into the configuration value model.
///
/// YAML merge keys (`<<`) are applied first. Scalar mapping keys are
/// stringified; tags are discarded and their inner value kept.
///
/// # Errors
///
/// Returns a message when merge keys are malformed or when a mapping uses a
/// sequence or mapping as a key.
pub fn from_yaml(mut yaml: serde_yaml::Value) -> Result<Value, String> {
    yaml.apply_merge().map_err(|e| e.to_string())?;
    convert(yaml)
}

fn convert(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => {
            Value::Array(items.into_iter().map(convert).collect::<Result<_, _>>()?)
        }
        Yaml::Mapping(mapping) => {
            let mut map = ConfigMap::new();
            for (key, value) in mapping {
                map.insert(mapping_key(key)?, convert(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => convert(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        // .nan and .inf have no JSON representation
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => mapping_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            Err("mapping keys must be scalars, found a sequence or mapping".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn yaml(text: &str) -> Value {
        from_yaml(serde_yaml::from_str(text).unwrap()).unwrap()
    }

    #[test]
    fn test_scalars_and_nesting() {
        let value = yaml("name: app\nport: 8080\nratio: 0.5\nenabled: true\nnothing: ~\nlist: [1, two]\n");
        assert_eq!(
            value,
            json!({
                "name": "app",
                "port": 8080,
                "ratio": 0.5,
                "enabled": true,
                "nothing": null,
                "list": [1, "two"]
            })
        );
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let value = yaml("1: one\ntrue: yes\n");
        assert_eq!(value, json!({"1": "one", "true": "yes"}));
    }

    #[test]
    fn test_complex_keys_are_rejected() {
        let parsed: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: value\n").unwrap();
        assert!(from_yaml(parsed).is_err());
    }

    #[test]
    fn test_merge_keys_are_applied() {
        let value = yaml("base: &base\n  host: localhost\nderived:\n  <<: *base\n  port: 1\n");
        assert_eq!(value["derived"], json!({"host": "localhost", "port": 1}));
    }

    #[test]
    fn test_tags_are_discarded() {
        let value = yaml("secret: !vault token\n");
        assert_eq!(value, json!({"secret": "token"}));
    }
}
