//! Top-level input shape

use crate::error::{Result, TransformError};
use serde_json::Value;
use sideload_core::{type_name, Limits, PathError};
use sideload_engine::{deep_clone, nesting_depth};

/// Whether the caller passed one record or a list of records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A bare object
    Single,
    /// An array of objects (possibly empty or of length one)
    Many,
}

impl Shape {
    /// Short name used in messages
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Single => "single",
            Shape::Many => "array",
        }
    }

    /// The opposite shape
    pub fn other(self) -> Self {
        match self {
            Shape::Single => Shape::Many,
            Shape::Many => Shape::Single,
        }
    }
}

/// Owned working copy of the input, tagged with its original shape
///
/// The shape is fixed at construction and decides how the result is wrapped;
/// it is never re-inferred from the element count.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A single record
    Single(Value),
    /// A list of records
    Many(Vec<Value>),
}

impl Target {
    /// Deep-copy `value` into a target, leaving the caller's graph untouched
    pub fn from_value(value: &Value, limits: &Limits) -> Result<Self> {
        match value {
            Value::Object(_) | Value::Array(_) => Self::from_owned(deep_clone(value, limits)?, limits),
            other => Err(TransformError::InvalidTarget {
                found_type: type_name(other).to_string(),
            }),
        }
    }

    /// Take ownership of an already private graph
    pub fn from_owned(value: Value, limits: &Limits) -> Result<Self> {
        let depth = nesting_depth(&value);
        if depth > limits.max_nesting_depth {
            return Err(PathError::NestingTooDeep {
                depth,
                max_depth: limits.max_nesting_depth,
            }
            .into());
        }

        match value {
            Value::Object(_) => Ok(Target::Single(value)),
            Value::Array(items) => {
                if let Some((index, item)) = items.iter().enumerate().find(|(_, item)| !item.is_object()) {
                    return Err(TransformError::TargetElementNotObject {
                        index,
                        found_type: type_name(item).to_string(),
                    });
                }
                Ok(Target::Many(items))
            }
            other => Err(TransformError::InvalidTarget {
                found_type: type_name(&other).to_string(),
            }),
        }
    }

    /// Original input shape
    pub fn shape(&self) -> Shape {
        match self {
            Target::Single(_) => Shape::Single,
            Target::Many(_) => Shape::Many,
        }
    }

    /// Number of top-level records
    pub fn len(&self) -> usize {
        match self {
            Target::Single(_) => 1,
            Target::Many(items) => items.len(),
        }
    }

    /// True for an empty array input
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level records as a uniform slice
    pub fn elements_mut(&mut self) -> &mut [Value] {
        match self {
            Target::Single(value) => std::slice::from_mut(value),
            Target::Many(items) => items.as_mut_slice(),
        }
    }

    /// Unwrap back to the original shape
    pub fn into_value(self) -> Value {
        match self {
            Target::Single(value) => value,
            Target::Many(items) => Value::Array(items),
        }
    }
}
