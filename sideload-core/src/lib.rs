//! Sideload Core - Graph primitives for sideload normalization
//!
//! This crate provides the traversal layer shared by every sideload operation,
//! with no I/O dependencies. It includes:
//!
//! - Dotted property paths and their validation
//! - Security limits
//! - Path resolution that broadens transparently over arrays
//! - Single-value lookups (`lookup`, `get_value`)
//! - Property visitation for read-only and in-place mutation
//! - Identifier keys used for deduplication
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod id;
pub mod limits;
pub mod path;
pub mod resolve;
pub mod visit;

// Re-export commonly used types
pub use error::{PathError, Result};
pub use id::IdKey;
pub use limits::Limits;
pub use path::PropertyPath;
pub use resolve::{get_value, is_falsy, lookup, resolve, resolve_mut, type_name};
pub use visit::{for_each_property, visit_properties, visit_property, PropertyVisitor};
