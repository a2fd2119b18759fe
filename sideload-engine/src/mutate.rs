//! Delete and rename mutations

use serde_json::{Map, Value};
use sideload_core::{visit_properties, visit_property, PropertyPath};

/// Remove every leaf matched by `paths`, returning how many were removed
pub fn delete_properties(target: &mut Value, paths: &[PropertyPath]) -> usize {
    let mut delete = |parent: &mut Map<String, Value>, key: &str| {
        parent.remove(key);
    };
    visit_properties(target, paths, &mut delete)
}

/// Move every leaf matched by `path` to the key `new_name` in the same parent
///
/// An existing value under `new_name` is overwritten. Renaming a key to itself
/// leaves the parent unchanged. Returns the number of leaves renamed.
pub fn rename_property(target: &mut Value, path: &PropertyPath, new_name: &str) -> usize {
    let mut rename = |parent: &mut Map<String, Value>, key: &str| {
        if key == new_name {
            return;
        }
        if let Some(value) = parent.remove(key) {
            parent.insert(new_name.to_string(), value);
        }
    };
    visit_property(target, path, &mut rename)
}
