//! Dotted property paths
//!
//! A property path such as `children.grandchildren` names a sequence of object
//! keys. Paths are parsed once, validated against [`Limits`], and then handed to
//! the resolver as a slice of segments.

use crate::error::{PathError, Result};
use crate::limits::Limits;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Separator between path segments
pub const SEGMENT_SEPARATOR: char = '.';

/// A validated, dot-separated property path
///
/// Always holds at least one non-empty segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: SmallVec<[String; 4]>,
}

impl PropertyPath {
    /// Parse a path using the default [`Limits`]
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with_limits(raw, &Limits::default())
    }

    /// Parse and validate a path against explicit limits
    pub fn parse_with_limits(raw: &str, limits: &Limits) -> Result<Self> {
        if raw.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let segments: SmallVec<[String; 4]> =
            raw.split(SEGMENT_SEPARATOR).map(str::to_string).collect();

        if let Some(position) = segments.iter().position(|s| s.is_empty()) {
            return Err(PathError::EmptySegment {
                path: raw.to_string(),
                position,
            });
        }

        let path = Self {
            raw: raw.to_string(),
            segments,
        };
        path.check(limits)?;
        Ok(path)
    }

    /// Re-check an already parsed path against (possibly stricter) limits
    pub fn check(&self, limits: &Limits) -> Result<()> {
        let length = self.char_len();
        if length > limits.max_path_length {
            return Err(PathError::PathTooLong {
                path: self.raw.clone(),
                length,
                max_length: limits.max_path_length,
            });
        }

        if self.segments.len() > limits.max_path_segments {
            return Err(PathError::TooManySegments {
                path: self.raw.clone(),
                segments: self.segments.len(),
                max_segments: limits.max_path_segments,
            });
        }

        Ok(())
    }

    /// The path as originally written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Path segments in traversal order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Length of the path string in characters
    pub fn char_len(&self) -> usize {
        self.raw.chars().count()
    }

    /// Split into the segments leading to the parent container and the leaf key
    pub fn parent_and_leaf(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((leaf, parent)) => (parent, leaf.as_str()),
            None => (&[], ""),
        }
    }

    /// True when the path is a single key
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

impl FromStr for PropertyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PropertyPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for PropertyPath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PropertyPath::parse(&raw).map_err(de::Error::custom)
    }
}
