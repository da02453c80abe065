//! Deep merge of configuration values
//!
//! Override values win over defaults, with three refinements:
//!
//! - Mappings merge recursively, key by key. A key matched in both inputs
//!   keeps the defaults map's key entry (identity and position).
//! - Sequences merge as an ordered union: defaults first, then overrides,
//!   value-equal duplicates dropped at their first occurrence.
//! - A sequence containing only strings merged against a mapping is first
//!   promoted to a mapping of string -> `true`. This lets authors write
//!   options either as a bare enable-list or as an explicit
//!   option -> enabled map, and layer the two forms losslessly.
//!
//! A null override never erases a present default. Merging is pure: both
//! inputs are left untouched and a fresh tree is returned.

use indexmap::IndexMap;

use crate::value::Value;

/// Merge `overrides` onto `defaults`, returning a new value.
pub fn merge(defaults: &Value, overrides: &Value) -> Value {
    // List-to-map promotion, in either direction
    if let (Some(promoted), Value::Mapping(over)) = (promote_string_list(defaults), overrides) {
        return Value::Mapping(merge_maps(&promoted, over));
    }
    if let (Value::Mapping(def), Some(promoted)) = (defaults, promote_string_list(overrides)) {
        return Value::Mapping(merge_maps(def, &promoted));
    }

    match (defaults, overrides) {
        (Value::Mapping(def), Value::Mapping(over)) => Value::Mapping(merge_maps(def, over)),
        (Value::Sequence(def), Value::Sequence(over)) => Value::Sequence(merge_lists(def, over)),
        (def, Value::Null) => def.clone(),
        (_, over) => over.clone(),
    }
}

/// Merge two mappings key by key.
///
/// Keys present only in `defaults` are untouched; keys present in both are
/// merged recursively; keys present only in `overrides` are appended in
/// their override order.
fn merge_maps(
    defaults: &IndexMap<String, Value>,
    overrides: &IndexMap<String, Value>,
) -> IndexMap<String, Value> {
    let mut result = defaults.clone();
    for (key, over_value) in overrides {
        let merged = match result.get(key) {
            Some(existing) => merge(existing, over_value),
            None => merge(&Value::Null, over_value),
        };
        // insert() on an existing key keeps the original key entry
        result.insert(key.clone(), merged);
    }
    result
}

/// Ordered union of two sequences, first occurrence wins.
fn merge_lists(defaults: &[Value], overrides: &[Value]) -> Vec<Value> {
    let mut result: Vec<Value> = Vec::with_capacity(defaults.len() + overrides.len());
    for item in defaults.iter().chain(overrides) {
        if !result.contains(item) {
            result.push(item.clone());
        }
    }
    result
}

/// If `value` is a sequence of string scalars, build the equivalent
/// string -> `true` mapping. Any non-string element disqualifies it.
fn promote_string_list(value: &Value) -> Option<IndexMap<String, Value>> {
    let Value::Sequence(items) = value else {
        return None;
    };
    let mut map = IndexMap::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => {
                map.insert(s.clone(), Value::Bool(true));
            }
            _ => return None,
        }
    }
    Some(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(text: &str) -> Value {
        crate::convert::convert(&serde_yaml::from_str(text).unwrap())
    }

    #[test]
    fn test_merge_scalar_override_wins() {
        assert_eq!(merge(&yaml("base"), &yaml("over")), yaml("over"));
        assert_eq!(merge(&yaml("1"), &yaml("2.5")), yaml("2.5"));
    }

    #[test]
    fn test_merge_null_override_keeps_default() {
        assert_eq!(merge(&yaml("x: 1"), &yaml("x: null")), yaml("x: 1"));
    }

    #[test]
    fn test_merge_null_default_takes_override() {
        assert_eq!(merge(&Value::Null, &yaml("x: 1")), yaml("x: 1"));
    }

    #[test]
    fn test_merge_maps_deep() {
        let defaults = yaml("database:\n  host: localhost\n  port: 5432");
        let overrides = yaml("database:\n  host: prod-db");
        let result = merge(&defaults, &overrides);

        assert_eq!(
            result.get_path("database.host").unwrap().as_str(),
            Some("prod-db")
        );
        assert_eq!(
            result.get_path("database.port").unwrap().as_i64(),
            Some(5432)
        );
    }

    #[test]
    fn test_merge_maps_keeps_default_only_keys_and_appends_new() {
        let result = merge(&yaml("a: 1\nb: 2"), &yaml("b: 3\nc: 4"));
        let map = result.as_mapping().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(result.get_path("a").unwrap().as_i64(), Some(1));
        assert_eq!(result.get_path("b").unwrap().as_i64(), Some(3));
        assert_eq!(result.get_path("c").unwrap().as_i64(), Some(4));
    }

    #[test]
    fn test_merge_maps_does_not_mutate_inputs() {
        let defaults = yaml("a: 1");
        let overrides = yaml("a: 2");
        let _ = merge(&defaults, &overrides);

        assert_eq!(defaults, yaml("a: 1"));
        assert_eq!(overrides, yaml("a: 2"));
    }

    #[test]
    fn test_merge_lists_union_first_occurrence() {
        let result = merge(&yaml("[1, 2, 3]"), &yaml("[2, 3, 4]"));
        assert_eq!(result, yaml("[1, 2, 3, 4]"));
    }

    #[test]
    fn test_merge_lists_preserves_nested_values() {
        let result = merge(&yaml("- a: 1"), &yaml("- a: 1\n- a: 2"));
        assert_eq!(result, yaml("- a: 1\n- a: 2"));
    }

    #[test]
    fn test_list_promotion_against_map() {
        let result = merge(&yaml("[a, b]"), &yaml("a: false"));
        assert_eq!(result, yaml("a: false\nb: true"));
    }

    #[test]
    fn test_list_promotion_symmetric() {
        let result = merge(&yaml("a: false"), &yaml("[a, b]"));
        assert_eq!(result, yaml("a: true\nb: true"));
    }

    #[test]
    fn test_list_promotion_requires_all_strings() {
        // A sequence with a non-string element is not promoted; the
        // mismatched kinds fall back to override-wins
        let result = merge(&yaml("[a, 1]"), &yaml("a: false"));
        assert_eq!(result, yaml("a: false"));
    }

    #[test]
    fn test_empty_sequence_promotes_to_empty_map() {
        let result = merge(&yaml("[]"), &yaml("a: true"));
        assert_eq!(result, yaml("a: true"));
    }

    #[test]
    fn test_type_mismatch_override_wins() {
        let result = merge(
            &yaml("database:\n  host: localhost"),
            &yaml("database: connection-string"),
        );
        assert_eq!(
            result.get_path("database").unwrap().as_str(),
            Some("connection-string")
        );
    }

    #[test]
    fn test_identity_empty_mapping_either_side() {
        let tree = yaml("a: 1\nb:\n  - x\n  - y");
        assert_eq!(merge(&tree, &Value::empty_mapping()), tree);
        assert_eq!(merge(&Value::empty_mapping(), &tree), tree);
    }

    #[test]
    fn test_idempotence_without_duplicate_list_values() {
        let tree = yaml("a: 1\nplugins:\n  - p1\n  - p2\nnested:\n  flag: true");
        assert_eq!(merge(&tree, &tree), tree);
    }
}
