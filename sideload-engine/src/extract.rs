//! Extraction and identifier replacement

use sideload_core::{lookup, visit_property, PropertyPath, PropertyVisitor};
use serde_json::{Map, Value};
use tracing::debug;

/// Visitor that swaps matched sub-objects for their identifiers
///
/// - An array leaf is replaced by the array of its elements' identifiers;
///   elements whose identifier is absent or `null` are left out.
/// - An object leaf is replaced by its identifier. When the identifier is
///   absent the leaf key is removed.
/// - `null` and scalar leaves are left untouched.
///
/// Every original that was replaced is collected, in encounter order.
#[derive(Debug)]
pub struct IdReplacer<'p> {
    id_attribute: &'p PropertyPath,
    extracted: Vec<Value>,
}

impl<'p> IdReplacer<'p> {
    /// Create a replacer reading identifiers from `id_attribute`
    pub fn new(id_attribute: &'p PropertyPath) -> Self {
        Self {
            id_attribute,
            extracted: Vec::new(),
        }
    }

    /// Originals collected so far
    pub fn extracted(&self) -> &[Value] {
        &self.extracted
    }

    /// Consume the replacer, returning the collected originals
    pub fn into_extracted(self) -> Vec<Value> {
        self.extracted
    }
}

impl PropertyVisitor for IdReplacer<'_> {
    fn visit(&mut self, parent: &mut Map<String, Value>, key: &str) {
        let Some(slot) = parent.get_mut(key) else {
            return;
        };

        match slot {
            Value::Array(items) => {
                let originals = std::mem::take(items);
                let ids: Vec<Value> = originals
                    .iter()
                    .filter_map(|item| lookup(item, self.id_attribute))
                    .filter(|id| !id.is_null())
                    .cloned()
                    .collect();
                *slot = Value::Array(ids);
                self.extracted.extend(originals);
            }
            Value::Object(_) => {
                let original = slot.take();
                match lookup(&original, self.id_attribute).cloned() {
                    Some(id) => *slot = id,
                    None => {
                        parent.remove(key);
                    }
                }
                self.extracted.push(original);
            }
            _ => {}
        }
    }
}

/// Replace every match of `property` with identifiers, returning the originals
///
/// Mutates `target` in place.
pub fn replace_with_id_array(
    target: &mut Value,
    property: &PropertyPath,
    id_attribute: &PropertyPath,
) -> Vec<Value> {
    let mut replacer = IdReplacer::new(id_attribute);
    let visits = visit_property(target, property, &mut replacer);
    let extracted = replacer.into_extracted();
    debug!(
        property = %property,
        id_attribute = %id_attribute,
        visits,
        extracted = extracted.len(),
        "replaced sideloaded values with ids"
    );
    extracted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> PropertyPath {
        PropertyPath::parse(raw).unwrap()
    }

    fn build_test_obj() -> Value {
        json!({
            "secondTier": {
                "emptyArray": [],
                "objArray": [
                    { "objId": 1, "thing": "foo" },
                    { "objId": 2, "bar": "baz" }
                ]
            },
            "firstTierArray": [{ "id": 100 }]
        })
    }

    #[test]
    fn empty_array_stays_empty() {
        let mut doc = build_test_obj();
        let extracted = replace_with_id_array(&mut doc, &path("secondTier.emptyArray"), &path("objId"));
        assert!(extracted.is_empty());
        assert_eq!(doc["secondTier"]["emptyArray"], json!([]));
    }

    #[test]
    fn replaces_first_tier_array() {
        let mut doc = build_test_obj();
        replace_with_id_array(&mut doc, &path("firstTierArray"), &path("id"));
        assert_eq!(doc["firstTierArray"], json!([100]));
    }

    #[test]
    fn replaces_nested_array_and_returns_originals() {
        let mut doc = build_test_obj();
        let extracted = replace_with_id_array(&mut doc, &path("secondTier.objArray"), &path("objId"));
        assert_eq!(doc["secondTier"]["objArray"], json!([1, 2]));
        assert_eq!(
            extracted,
            vec![json!({ "objId": 1, "thing": "foo" }), json!({ "objId": 2, "bar": "baz" })]
        );
    }

    #[test]
    fn replaces_single_object_with_id() {
        let mut doc = json!({ "book": { "author": { "id": "a1", "name": "Ann" } } });
        let extracted = replace_with_id_array(&mut doc, &path("book.author"), &path("id"));
        assert_eq!(doc, json!({ "book": { "author": "a1" } }));
        assert_eq!(extracted, vec![json!({ "id": "a1", "name": "Ann" })]);
    }

    #[test]
    fn object_without_id_loses_its_key_but_is_collected() {
        let mut doc = json!({ "book": { "author": { "name": "Ann" }, "title": "T" } });
        let extracted = replace_with_id_array(&mut doc, &path("book.author"), &path("id"));
        assert_eq!(doc, json!({ "book": { "title": "T" } }));
        assert_eq!(extracted.len(), 1);
    }

    #[test]
    fn missing_or_null_ids_are_dropped_from_id_arrays() {
        let mut doc = json!({ "tags": [{ "id": 1 }, { "name": "x" }, { "id": null }, 7, null, { "id": 0 }] });
        let extracted = replace_with_id_array(&mut doc, &path("tags"), &path("id"));
        assert_eq!(doc["tags"], json!([1, 0]));
        assert_eq!(extracted.len(), 6);
    }

    #[test]
    fn nested_identifier_paths() {
        let mut doc = json!({ "people": [{ "key": { "id": "p1" } }, { "key": { "id": "p2" } }] });
        replace_with_id_array(&mut doc, &path("people"), &path("key.id"));
        assert_eq!(doc["people"], json!(["p1", "p2"]));
    }

    #[test]
    fn null_and_scalar_leaves_are_untouched() {
        let mut doc = json!({ "a": null, "b": 5, "c": "text" });
        for key in ["a", "b", "c"] {
            assert!(replace_with_id_array(&mut doc, &path(key), &path("id")).is_empty());
        }
        assert_eq!(doc, json!({ "a": null, "b": 5, "c": "text" }));
    }

    #[test]
    fn broadens_over_parent_arrays() {
        let mut doc = json!({
            "children": [
                { "cid": 1, "grandchildren": [{ "gid": 1 }] },
                { "cid": 2, "grandchildren": [{ "gid": 2 }, { "gid": 3 }] }
            ]
        });
        let extracted = replace_with_id_array(&mut doc, &path("children.grandchildren"), &path("gid"));
        assert_eq!(extracted, vec![json!({ "gid": 1 }), json!({ "gid": 2 }), json!({ "gid": 3 })]);
        assert_eq!(doc["children"][1]["grandchildren"], json!([2, 3]));
    }
}
