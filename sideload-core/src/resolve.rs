//! Path resolution over JSON graphs
//!
//! Resolution walks a path one segment at a time. Arrays never consume a
//! segment: whenever the walk lands on an array, every element is resolved with
//! the same remaining segments and the results are flattened in array order.
//! Missing keys, scalars and `null` in the middle of a path end that branch
//! without a match.

use crate::path::PropertyPath;
use serde_json::Value;

/// Resolve `segments` against `node`, returning every matched location
///
/// Returned locations are never arrays: arrays reached at the end of the path
/// are broadened into their elements.
pub fn resolve<'a>(node: &'a Value, segments: &[String]) -> Vec<&'a Value> {
    let mut out = Vec::new();
    collect(node, segments, &mut out);
    out
}

fn collect<'a>(node: &'a Value, segments: &[String], out: &mut Vec<&'a Value>) {
    match (node, segments.split_first()) {
        (Value::Array(items), _) => {
            for item in items {
                collect(item, segments, out);
            }
        }
        (node, None) => out.push(node),
        (Value::Object(map), Some((head, rest))) => {
            if let Some(child) = map.get(head.as_str()) {
                collect(child, rest, out);
            }
        }
        _ => {}
    }
}

/// Mutable counterpart of [`resolve`]
///
/// Matched locations are disjoint subtrees, so all of them can be held at once.
pub fn resolve_mut<'a>(node: &'a mut Value, segments: &[String]) -> Vec<&'a mut Value> {
    let mut out = Vec::new();
    collect_mut(node, segments, &mut out);
    out
}

fn collect_mut<'a>(node: &'a mut Value, segments: &[String], out: &mut Vec<&'a mut Value>) {
    match (node, segments.split_first()) {
        (Value::Array(items), _) => {
            for item in items.iter_mut() {
                collect_mut(item, segments, out);
            }
        }
        (node, None) => out.push(node),
        (Value::Object(map), Some((head, rest))) => {
            if let Some(child) = map.get_mut(head.as_str()) {
                collect_mut(child, rest, out);
            }
        }
        _ => {}
    }
}

/// Step from `node` into `segment`
///
/// Objects are indexed by key and arrays by numeric position. Anything else has
/// no children.
fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

/// Strict single-value lookup
///
/// Follows the path without broadening over arrays. `None` means the value is
/// absent; a stored `null` is returned as `Some(Value::Null)`.
pub fn lookup<'a>(node: &'a Value, path: &PropertyPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(node, |current, segment| child(current, segment))
}

/// Single-value read with falsy-coalescing semantics
///
/// - `null` at the final segment is returned as `null`
/// - `null` before the final segment, or any absent value, yields `default`
/// - `false`, `0` and `""` at the final segment also yield `default`
pub fn get_value<'a>(
    node: &'a Value,
    path: &PropertyPath,
    default: Option<&'a Value>,
) -> Option<&'a Value> {
    let segments = path.segments();
    let mut current = node;

    for (idx, segment) in segments.iter().enumerate() {
        current = match child(current, segment) {
            None => return default,
            Some(null @ Value::Null) if idx + 1 == segments.len() => return Some(null),
            Some(Value::Null) => return default,
            Some(value) => value,
        };
    }

    if is_falsy(current) {
        default
    } else {
        Some(current)
    }
}

/// Whether a value counts as falsy for [`get_value`]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Get a human-readable type name for a JSON value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> PropertyPath {
        PropertyPath::parse(raw).unwrap()
    }

    fn segments(raw: &str) -> Vec<String> {
        raw.split('.').map(str::to_string).collect()
    }

    fn sample() -> Value {
        json!({
            "propOne": "one",
            "propTwo": { "propThree": "three" },
            "propFour": [
                {
                    "propFive": "five-one",
                    "propSix": [{ "propSeven": "seven-one" }, { "propSeven": "seven-two" }]
                },
                {
                    "propFive": "five-two",
                    "propSix": [{ "propSeven": "seven-three" }, { "propSeven": "seven-four" }]
                }
            ]
        })
    }

    #[test]
    fn empty_path_returns_node() {
        let doc = json!({"a": 1});
        assert_eq!(resolve(&doc, &[]), vec![&doc]);
    }

    #[test]
    fn empty_path_broadens_root_array() {
        let doc = json!([{"a": 1}, {"a": 2}]);
        let found = resolve(&doc, &[]);
        assert_eq!(found, vec![&json!({"a": 1}), &json!({"a": 2})]);
    }

    #[test]
    fn resolves_scalar_leaf() {
        let doc = sample();
        assert_eq!(resolve(&doc, &segments("propTwo.propThree")), vec![&json!("three")]);
    }

    #[test]
    fn broadens_over_nested_arrays() {
        let doc = sample();
        let found = resolve(&doc, &segments("propFour.propSix.propSeven"));
        assert_eq!(
            found,
            vec![
                &json!("seven-one"),
                &json!("seven-two"),
                &json!("seven-three"),
                &json!("seven-four"),
            ]
        );
    }

    #[test]
    fn flattens_arrays_of_arrays() {
        let doc = json!({"rows": [[{"v": 1}, {"v": 2}], [{"v": 3}]]});
        let found = resolve(&doc, &segments("rows.v"));
        assert_eq!(found, vec![&json!(1), &json!(2), &json!(3)]);
    }

    #[test]
    fn missing_and_scalar_mid_path_yield_nothing() {
        let doc = json!({"a": 5, "b": null, "c": {"d": 1}});
        assert!(resolve(&doc, &segments("a.x")).is_empty());
        assert!(resolve(&doc, &segments("b.x")).is_empty());
        assert!(resolve(&doc, &segments("c.missing")).is_empty());
        assert!(resolve(&doc, &segments("nope.x")).is_empty());
    }

    #[test]
    fn null_leaf_is_a_match() {
        let doc = json!({"a": {"b": null}});
        assert_eq!(resolve(&doc, &segments("a.b")), vec![&Value::Null]);
    }

    #[test]
    fn resolve_mut_allows_in_place_edits() {
        let mut doc = sample();
        for value in resolve_mut(&mut doc, &segments("propFour.propSix")) {
            if let Value::Object(map) = value {
                map.insert("seen".to_string(), json!(true));
            }
        }
        assert_eq!(doc["propFour"][0]["propSix"][1]["seen"], json!(true));
        assert_eq!(doc["propFour"][1]["propSix"][0]["seen"], json!(true));
    }

    #[test]
    fn lookup_is_strict() {
        let doc = json!({"a": {"zero": 0, "empty": "", "no": false, "nil": null}, "list": [10, 20]});
        assert_eq!(lookup(&doc, &path("a.zero")), Some(&json!(0)));
        assert_eq!(lookup(&doc, &path("a.empty")), Some(&json!("")));
        assert_eq!(lookup(&doc, &path("a.nil")), Some(&Value::Null));
        assert_eq!(lookup(&doc, &path("a.nil.x")), None);
        assert_eq!(lookup(&doc, &path("list.1")), Some(&json!(20)));
        assert_eq!(lookup(&doc, &path("a.missing")), None);
    }

    #[test]
    fn get_value_reads_nested_values() {
        let doc = json!({"intVal1": 1, "innerObject": {"intVal2": 2, "nullVal": null}});
        assert_eq!(get_value(&doc, &path("intVal1"), None), Some(&json!(1)));
        assert_eq!(get_value(&doc, &path("innerObject.intVal2"), None), Some(&json!(2)));
        assert_eq!(
            get_value(&doc, &path("innerObject"), None).and_then(|v| v.get("intVal2")),
            Some(&json!(2))
        );
        assert_eq!(get_value(&doc, &path("doesNotExist"), None), None);
        assert_eq!(get_value(&doc, &path("innerObject.doesNotExist"), None), None);
    }

    #[test]
    fn get_value_null_semantics() {
        let doc = json!({"innerObject": {"nullVal": null}});
        let fallback = json!(100);
        assert_eq!(
            get_value(&doc, &path("innerObject.nullVal"), Some(&fallback)),
            Some(&Value::Null)
        );
        assert_eq!(
            get_value(&doc, &path("innerObject.nullVal.deeper"), Some(&fallback)),
            Some(&fallback)
        );
        assert_eq!(
            get_value(&doc, &path("doesNotExist"), Some(&fallback)),
            Some(&fallback)
        );
    }

    #[test]
    fn get_value_coalesces_falsy_leaves() {
        let doc = json!({"zero": 0, "float_zero": 0.0, "empty": "", "no": false, "yes": true, "list": []});
        let fallback = json!("default");
        for key in ["zero", "float_zero", "empty", "no"] {
            assert_eq!(get_value(&doc, &path(key), Some(&fallback)), Some(&fallback), "{key}");
            assert_eq!(get_value(&doc, &path(key), None), None, "{key}");
        }
        assert_eq!(get_value(&doc, &path("yes"), Some(&fallback)), Some(&json!(true)));
        assert_eq!(get_value(&doc, &path("list"), Some(&fallback)), Some(&json!([])));
    }

    #[test]
    fn type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!([1])), "array");
        assert_eq!(type_name(&json!("s")), "string");
    }
}
