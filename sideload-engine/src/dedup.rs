//! Identifier-based deduplication

use ahash::AHashSet;
use serde_json::Value;
use sideload_core::{lookup, IdKey, PropertyPath};
use tracing::debug;

/// Keep the first entry for each distinct identifier, in original order
///
/// Entries whose identifier is absent are dropped. Identifiers that are
/// arrays or objects never match one another, so such entries are all kept.
pub fn remove_duplicates_by_id(items: Vec<Value>, id_attribute: &PropertyPath) -> Vec<Value> {
    let before = items.len();
    let mut seen: AHashSet<IdKey> = AHashSet::with_capacity(before);

    let kept: Vec<Value> = items
        .into_iter()
        .filter(|item| match lookup(item, id_attribute) {
            None => false,
            Some(id) => match IdKey::from_value(id) {
                Some(key) => seen.insert(key),
                None => true,
            },
        })
        .collect();

    if kept.len() != before {
        debug!(
            id_attribute = %id_attribute,
            dropped = before - kept.len(),
            kept = kept.len(),
            "removed duplicate sideload entries"
        );
    }

    kept
}
