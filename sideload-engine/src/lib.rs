//! Sideload Engine - Write operations over JSON graphs
//!
//! Every operation in this crate is a [`PropertyVisitor`](sideload_core::PropertyVisitor)
//! driven by the shared traversal in `sideload-core`:
//!
//! - Extraction: pull sub-objects out and replace them with their identifiers
//! - Deduplication: keep the first entry per identifier
//! - Mutations: delete and rename properties
//! - Bounded deep clone of input graphs

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod clone;
pub mod dedup;
pub mod extract;
pub mod mutate;

pub use clone::{deep_clone, nesting_depth};
pub use dedup::remove_duplicates_by_id;
pub use extract::{replace_with_id_array, IdReplacer};
pub use mutate::{delete_properties, rename_property};
