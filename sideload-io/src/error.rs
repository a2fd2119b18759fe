//! Error types for sideload transformations

use sideload_core::PathError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while transforming a graph
///
/// Traversal misses are never errors. Only spec misuse, illegal top-level
/// input, limit violations and I/O surface here.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Top-level input is neither an object nor an array
    #[error(
        "Invalid target: expected an object or an array of objects, found {found_type}.\n\
         \n\
         Sideloading operates on a single record or a list of records."
    )]
    InvalidTarget {
        /// Actual type found
        found_type: String,
    },

    /// Element of a top-level array is not an object
    #[error(
        "Invalid target element: item {index} of the input array is {found_type}, expected object.\n\
         \n\
         Every top-level element must be a record. Filter scalars and nulls out first."
    )]
    TargetElementNotObject {
        /// Index of the offending element
        index: usize,
        /// Actual type found
        found_type: String,
    },

    /// Wrapper name required by the input shape is missing
    #[error(
        "Missing wrapper name: {shape} input requires `wrapper.{field}`.\n\
         \n\
         Suggested fixes:\n\
         1. Add `{field}` to the wrapper spec\n\
         2. Pass a {other_shape} input instead"
    )]
    MissingWrapperName {
        /// Shape of the input ("single" or "array")
        shape: &'static str,
        /// Wrapper field that was required
        field: &'static str,
        /// The other input shape
        other_shape: &'static str,
    },

    /// Transformation spec is structurally valid but semantically wrong
    #[error("Invalid transformation spec: {reason}")]
    InvalidSpec {
        /// Explanation of why the spec is invalid
        reason: String,
    },

    /// A sideload collection would overwrite the wrapped input
    #[error(
        "Collection name collision: sideload collection '{name}' has the same name as the wrapper key.\n\
         \n\
         Choose a different `as` name for the sideload or a different wrapper name."
    )]
    CollectionNameCollision {
        /// Colliding name
        name: String,
    },

    /// Path or limit violation
    #[error(transparent)]
    Path(#[from] PathError),

    /// Spec file could not be parsed
    #[error("Failed to parse spec file '{}': {reason}", path.display())]
    SpecParse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser error message
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON parse error while {context}: {source}")]
    JsonParse {
        /// Context describing where parsing failed
        context: String,
        /// Underlying serde_json error
        source: serde_json::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TransformError>;
