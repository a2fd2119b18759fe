//! Bounded deep clone of input graphs

use serde_json::{Map, Value};
use sideload_core::{Limits, PathError, Result};

/// Copy `value`, rejecting graphs nested deeper than `limits.max_nesting_depth`
///
/// Depth counts enclosing arrays and objects; a bare scalar has depth 0.
pub fn deep_clone(value: &Value, limits: &Limits) -> Result<Value> {
    copy(value, 0, limits.max_nesting_depth)
}

fn copy(value: &Value, depth: usize, max_depth: usize) -> Result<Value> {
    match value {
        Value::Array(items) => {
            let depth = enter(depth, max_depth)?;
            items
                .iter()
                .map(|item| copy(item, depth, max_depth))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        Value::Object(map) => {
            let depth = enter(depth, max_depth)?;
            map.iter()
                .map(|(key, item)| Ok((key.clone(), copy(item, depth, max_depth)?)))
                .collect::<Result<Map<String, Value>>>()
                .map(Value::Object)
        }
        scalar => Ok(scalar.clone()),
    }
}

fn enter(depth: usize, max_depth: usize) -> Result<usize> {
    let depth = depth + 1;
    if depth > max_depth {
        return Err(PathError::NestingTooDeep { depth, max_depth });
    }
    Ok(depth)
}

/// Container nesting depth of `value`
pub fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested(levels: usize) -> Value {
        (0..levels).fold(json!(1), |inner, _| json!({ "n": inner }))
    }

    #[test]
    fn clone_is_structurally_equal() {
        let doc = json!({ "a": [1, { "b": null }], "c": "s" });
        let copy = deep_clone(&doc, &Limits::default()).unwrap();
        assert_eq!(copy, doc);
    }

    #[test]
    fn measures_depth() {
        assert_eq!(nesting_depth(&json!(1)), 0);
        assert_eq!(nesting_depth(&json!([])), 1);
        assert_eq!(nesting_depth(&json!({ "a": [[1]] })), 3);
        assert_eq!(nesting_depth(&nested(10)), 10);
    }

    #[test]
    fn rejects_graphs_beyond_limit() {
        let limits = Limits {
            max_nesting_depth: 8,
            ..Limits::default()
        };
        assert!(deep_clone(&nested(8), &limits).is_ok());
        assert_eq!(
            deep_clone(&nested(9), &limits),
            Err(PathError::NestingTooDeep { depth: 9, max_depth: 8 })
        );
    }
}
