//! Conversion from the parsed YAML node graph into [`Value`]
//!
//! Conversion is total: any well-formed YAML node maps to some `Value`.
//! Mapping entries whose key is not a string scalar are silently dropped,
//! so the model only ever carries string-keyed mappings.

use indexmap::IndexMap;

use crate::value::Value;

/// Convert a parsed YAML node into a configuration value.
pub fn convert(node: &serde_yaml::Value) -> Value {
    match node {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else {
                // u64 overflow or a genuine float; either way f64 is the
                // widest representation available
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Sequence(seq.iter().map(convert).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut out = IndexMap::new();
            for (key, value) in map {
                // Non-string keys are dropped rather than stringified
                if let serde_yaml::Value::String(key) = key {
                    out.insert(key.clone(), convert(value));
                }
            }
            Value::Mapping(out)
        }
        // Tags carry no meaning in this model; use the inner node
        serde_yaml::Value::Tagged(tagged) => convert(&tagged.value),
    }
}
