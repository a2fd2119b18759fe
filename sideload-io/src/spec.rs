//! Transformation spec model
//!
//! A [`TransformSpec`] is usually deserialized from JSON or TOML:
//!
//! ```json
//! {
//!     "wrapper": { "singular": "book", "plural": "books" },
//!     "sideloads": [
//!         { "property": "metadata.authors", "idAttribute": "id", "as": "authors" },
//!         { "property": "content.chapters", "idAttribute": "id", "as": "chapters" }
//!     ],
//!     "rename": { "property": "content.chapters", "name": "chapterList" },
//!     "delete": "internal"
//! }
//! ```
//!
//! `sideloads`, `rename` and `delete` each accept a single item or a list.

use crate::error::{Result, TransformError};
use crate::target::Shape;
use serde::de::{self, Deserializer, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::{Deserialize, Serialize};
use sideload_core::{Limits, PropertyPath};
use std::fmt;
use std::marker::PhantomData;

/// A list that may be written as a single bare item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OneOrMany<T>(Vec<T>);

impl<T> OneOrMany<T> {
    /// A list holding exactly one item
    pub fn one(item: T) -> Self {
        Self(vec![item])
    }

    /// Items in declaration order
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no items were given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an item
    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    /// Iterate over items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Consume into the underlying list
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OneOrManyVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OneOrManyVisitor<T> {
            type Value = OneOrMany<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a single item or a list of items")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> std::result::Result<Self::Value, A::Error> {
                Vec::<T>::deserialize(SeqAccessDeserializer::new(seq)).map(OneOrMany)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Self::Value, A::Error> {
                T::deserialize(MapAccessDeserializer::new(map)).map(OneOrMany::one)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                T::deserialize(v.into_deserializer()).map(OneOrMany::one)
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(OneOrMany::default())
            }
        }

        deserializer.deserialize_any(OneOrManyVisitor(PhantomData))
    }
}

/// Names of the key holding the wrapped input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrapperSpec {
    /// Key used when the input is a single object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,
    /// Key used when the input is an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

impl WrapperSpec {
    /// Wrapper with both names
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: Some(singular.into()),
            plural: Some(plural.into()),
        }
    }

    /// Wrapper key for an input of the given shape
    pub fn key_for(&self, shape: Shape) -> Result<&str> {
        let (name, field) = match shape {
            Shape::Single => (&self.singular, "singular"),
            Shape::Many => (&self.plural, "plural"),
        };
        name.as_deref()
            .ok_or(TransformError::MissingWrapperName {
                shape: shape.as_str(),
                field,
                other_shape: shape.other().as_str(),
            })
    }
}

/// Extract `property`, replacing it with the value at `id_attribute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideloadSpec {
    /// Path of the value(s) to extract
    pub property: PropertyPath,
    /// Path, relative to each extracted object, of its identifier
    #[serde(rename = "idAttribute", alias = "id_attribute")]
    pub id_attribute: PropertyPath,
    /// Output collection; `None` replaces with ids without collecting
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl SideloadSpec {
    /// Replace-only sideload of `property` by `id_attribute`
    pub fn new(property: &str, id_attribute: &str) -> sideload_core::Result<Self> {
        Ok(Self {
            property: PropertyPath::parse(property)?,
            id_attribute: PropertyPath::parse(id_attribute)?,
            collection: None,
        })
    }

    /// Collect extracted values under `name`
    pub fn collect_as(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }
}

/// Rename the leaf matched by `property` to `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameSpec {
    /// Path of the key to rename
    pub property: PropertyPath,
    /// New key name in the same parent
    pub name: String,
}

impl RenameSpec {
    /// Rename `property` to `name`
    pub fn new(property: &str, name: impl Into<String>) -> sideload_core::Result<Self> {
        Ok(Self {
            property: PropertyPath::parse(property)?,
            name: name.into(),
        })
    }
}

/// Order in which sideload and rename specs are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathOrdering {
    /// Longest path string first
    #[default]
    StringLength,
    /// Most segments first
    SegmentCount,
}

impl PathOrdering {
    fn weight(self, path: &PropertyPath) -> usize {
        match self {
            PathOrdering::StringLength => path.char_len(),
            PathOrdering::SegmentCount => path.depth(),
        }
    }

    /// Stable sort, heaviest path first
    pub fn sort<'a, T>(self, items: &'a [T], path_of: impl Fn(&T) -> &PropertyPath) -> Vec<&'a T> {
        let mut sorted: Vec<&T> = items.iter().collect();
        if sorted.len() > 1 {
            sorted.sort_by(|a, b| self.weight(path_of(*b)).cmp(&self.weight(path_of(*a))));
        }
        sorted
    }
}

/// Complete description of one sideload transformation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformSpec {
    /// Wrapper key names
    #[serde(default)]
    pub wrapper: WrapperSpec,
    /// Values to extract into collections
    #[serde(default, alias = "sideloading", skip_serializing_if = "OneOrMany::is_empty")]
    pub sideloads: OneOrMany<SideloadSpec>,
    /// Keys to rename before extraction
    #[serde(default, skip_serializing_if = "OneOrMany::is_empty")]
    pub rename: OneOrMany<RenameSpec>,
    /// Keys to delete before renaming
    #[serde(default, skip_serializing_if = "OneOrMany::is_empty")]
    pub delete: OneOrMany<PropertyPath>,
    /// Application order of sideload and rename specs
    #[serde(default)]
    pub ordering: PathOrdering,
}

impl TransformSpec {
    /// Spec with only a wrapper
    pub fn new(wrapper: WrapperSpec) -> Self {
        Self {
            wrapper,
            ..Self::default()
        }
    }

    /// Add a sideload spec
    pub fn with_sideload(mut self, spec: SideloadSpec) -> Self {
        self.sideloads.push(spec);
        self
    }

    /// Add a rename spec
    pub fn with_rename(mut self, spec: RenameSpec) -> Self {
        self.rename.push(spec);
        self
    }

    /// Add a path to delete
    pub fn with_delete(mut self, path: PropertyPath) -> Self {
        self.delete.push(path);
        self
    }

    /// Use a different application order
    pub fn with_ordering(mut self, ordering: PathOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Check every path against `limits` and every name for emptiness
    pub fn validate(&self, limits: &Limits) -> Result<()> {
        for spec in &self.sideloads {
            spec.property.check(limits)?;
            spec.id_attribute.check(limits)?;
            if spec.collection.as_deref() == Some("") {
                return Err(TransformError::InvalidSpec {
                    reason: format!(
                        "sideload of '{}' has an empty `as` name; omit `as` to replace without collecting",
                        spec.property
                    ),
                });
            }
        }

        for spec in &self.rename {
            spec.property.check(limits)?;
            if spec.name.is_empty() || spec.name.contains(sideload_core::path::SEGMENT_SEPARATOR) {
                return Err(TransformError::InvalidSpec {
                    reason: format!(
                        "rename of '{}' needs a non-empty target name without '.', got '{}'",
                        spec.property, spec.name
                    ),
                });
            }
        }

        for path in &self.delete {
            path.check(limits)?;
        }

        Ok(())
    }

    /// Sideload specs in application order
    pub fn ordered_sideloads(&self) -> Vec<&SideloadSpec> {
        self.ordering
            .sort(self.sideloads.as_slice(), |spec| &spec.property)
    }

    /// Rename specs in application order
    pub fn ordered_renames(&self) -> Vec<&RenameSpec> {
        self.ordering.sort(self.rename.as_slice(), |spec| &spec.property)
    }
}
