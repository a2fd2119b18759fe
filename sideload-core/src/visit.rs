//! Property visitation
//!
//! Every write operation (delete, rename, extraction) is expressed as a
//! [`PropertyVisitor`] over the same traversal, so they all agree on which
//! locations a path matches.
//!
//! For a path `a.b.c` the parent containers are the locations resolved from
//! `a.b`, and the visitor fires for each parent object that holds key `c`.

use crate::path::PropertyPath;
use crate::resolve::{resolve, resolve_mut};
use serde_json::{Map, Value};
use tracing::trace;

/// Callback invoked once per matched leaf
///
/// The leaf value is `parent[key]`; it is guaranteed to be present when
/// `visit` is called. Implementations may mutate `parent` freely.
pub trait PropertyVisitor {
    /// Visit the leaf stored under `key` in `parent`
    fn visit(&mut self, parent: &mut Map<String, Value>, key: &str);
}

impl<F> PropertyVisitor for F
where
    F: FnMut(&mut Map<String, Value>, &str),
{
    fn visit(&mut self, parent: &mut Map<String, Value>, key: &str) {
        self(parent, key)
    }
}

/// Visit every leaf matched by `path`, returning the number of visits
pub fn visit_property<V>(node: &mut Value, path: &PropertyPath, visitor: &mut V) -> usize
where
    V: PropertyVisitor + ?Sized,
{
    let (parent_segments, key) = path.parent_and_leaf();
    let mut visits = 0;

    for parent in resolve_mut(node, parent_segments) {
        if let Value::Object(map) = parent {
            if map.contains_key(key) {
                trace!(path = %path, key, "visiting property");
                visitor.visit(map, key);
                visits += 1;
            }
        }
    }

    visits
}

/// Visit each path in list order, returning the total number of visits
pub fn visit_properties<V>(node: &mut Value, paths: &[PropertyPath], visitor: &mut V) -> usize
where
    V: PropertyVisitor + ?Sized,
{
    let mut visits = 0;
    for path in paths {
        visits += visit_property(node, path, visitor);
    }
    visits
}

/// Read-only visitation: `f(value, parent, key)` for every matched leaf
pub fn for_each_property<'a, F>(node: &'a Value, paths: &[PropertyPath], mut f: F)
where
    F: FnMut(&'a Value, &'a Map<String, Value>, &'a str),
{
    for path in paths {
        let (parent_segments, key) = path.parent_and_leaf();
        for parent in resolve(node, parent_segments) {
            if let Value::Object(map) = parent {
                if let Some((key, value)) = map.get_key_value(key) {
                    f(value, map, key.as_str());
                }
            }
        }
    }
}
