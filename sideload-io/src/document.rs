//! Sideloaded output document

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use sideload_core::PropertyPath;
use sideload_engine::remove_duplicates_by_id;

/// Named sideload collections in first-contribution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideloadContainer {
    collections: Vec<(String, Vec<Value>)>,
}

impl SideloadContainer {
    /// Append `items` to the collection `name`, creating it on first use
    pub fn append(&mut self, name: &str, items: Vec<Value>) {
        match self.get_mut(name) {
            Some(existing) => existing.extend(items),
            None => self.collections.push((name.to_string(), items)),
        }
    }

    /// Deduplicate collection `name` by `id_attribute`, if it exists
    pub fn dedup(&mut self, name: &str, id_attribute: &PropertyPath) {
        if let Some(items) = self.get_mut(name) {
            *items = remove_duplicates_by_id(std::mem::take(items), id_attribute);
        }
    }

    /// Entries of collection `name`
    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.collections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, items)| items.as_slice())
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        self.collections
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, items)| items)
    }

    /// True when collection `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// True when nothing was collected
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Collections in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.collections
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}

/// Result of a sideload transformation
///
/// Serializes as `{ wrapperKey: primary, collection: [...], ... }` with the
/// wrapper first and collections in the order they were first filled.
#[derive(Debug, Clone, PartialEq)]
pub struct SideloadDocument {
    wrapper_key: String,
    primary: Value,
    collections: SideloadContainer,
}

impl SideloadDocument {
    /// Assemble a document
    pub fn new(wrapper_key: String, primary: Value, collections: SideloadContainer) -> Self {
        Self {
            wrapper_key,
            primary,
            collections,
        }
    }

    /// Key under which the transformed input is stored
    pub fn wrapper_key(&self) -> &str {
        &self.wrapper_key
    }

    /// The transformed input
    pub fn primary(&self) -> &Value {
        &self.primary
    }

    /// A named sideload collection
    pub fn collection(&self, name: &str) -> Option<&[Value]> {
        self.collections.get(name)
    }

    /// All sideload collections
    pub fn collections(&self) -> &SideloadContainer {
        &self.collections
    }

    /// Convert into a plain JSON object
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert(self.wrapper_key, self.primary);
        for (name, items) in self.collections.collections {
            map.insert(name, Value::Array(items));
        }
        Value::Object(map)
    }
}

impl Serialize for SideloadDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.collections.len()))?;
        map.serialize_entry(&self.wrapper_key, &self.primary)?;
        for (name, items) in self.collections.iter() {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}
