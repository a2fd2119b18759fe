//! Sideload I/O - Transformation specs, the orchestrator and reader/writer APIs
//!
//! This crate ties the path and extraction layers together:
//!
//! - [`TransformSpec`] and friends, deserializable from JSON or TOML
//! - [`transform`], which turns a record or list of records into a
//!   [`SideloadDocument`] with deduplicated sideload collections
//! - [`transform_reader`] and [`load_spec`] for file and stream driven use

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod spec;
pub mod target;
pub mod transform;

// Re-export commonly used types
pub use document::{SideloadContainer, SideloadDocument};
pub use error::{Result, TransformError};
pub use sideload_core::{Limits, PathError, PropertyPath};
pub use spec::{OneOrMany, PathOrdering, RenameSpec, SideloadSpec, TransformSpec, WrapperSpec};
pub use target::{Shape, Target};
pub use transform::{transform, transform_owned, transform_with_limits};

use serde_json::Value;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Options for [`transform_reader`]
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Security limits
    pub limits: Limits,
    /// Pretty-print the output document
    pub pretty: bool,
}

/// What a [`transform_reader`] call did
#[derive(Debug, Clone)]
pub struct TransformSummary {
    /// Shape of the input document
    pub shape: Shape,
    /// Number of top-level records
    pub top_level_elements: usize,
    /// Entry count of each sideload collection, in output order
    pub collections: Vec<(String, usize)>,
    /// Wall time spent parsing, transforming and writing
    pub duration: Duration,
}

/// Read one JSON document, transform it and write the result
pub fn transform_reader<R: Read, W: Write>(
    input: R,
    output: W,
    spec: &TransformSpec,
    opts: &TransformOptions,
) -> Result<TransformSummary> {
    let start = Instant::now();

    let value: Value = serde_json::from_reader(BufReader::new(input)).map_err(|source| {
        TransformError::JsonParse {
            context: "reading input document".to_string(),
            source,
        }
    })?;

    let top_level_elements = match &value {
        Value::Array(items) => items.len(),
        _ => 1,
    };
    let shape = if value.is_array() {
        Shape::Many
    } else {
        Shape::Single
    };

    let document = transform_owned(value, spec, &opts.limits)?;
    let collections = document
        .collections()
        .iter()
        .map(|(name, items)| (name.to_string(), items.len()))
        .collect();

    let mut writer = BufWriter::new(output);
    let written = if opts.pretty {
        serde_json::to_writer_pretty(&mut writer, &document)
    } else {
        serde_json::to_writer(&mut writer, &document)
    };
    written.map_err(|source| TransformError::JsonParse {
        context: "writing output document".to_string(),
        source,
    })?;
    writeln!(writer)?;
    writer.flush()?;

    let summary = TransformSummary {
        shape,
        top_level_elements,
        collections,
        duration: start.elapsed(),
    };
    info!(
        elements = summary.top_level_elements,
        collections = summary.collections.len(),
        elapsed_ms = summary.duration.as_millis() as u64,
        "transform complete"
    );
    Ok(summary)
}

/// Load a spec file; `.toml` files are parsed as TOML, everything else as JSON
pub fn load_spec(path: impl AsRef<Path>) -> Result<TransformSpec> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        toml::from_str(&text).map_err(|err| err.to_string())
    } else {
        parse_spec(&text)
    };

    parsed.map_err(|reason| TransformError::SpecParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse a JSON spec from a string
pub fn parse_spec(text: &str) -> std::result::Result<TransformSpec, String> {
    serde_json::from_str(text).map_err(|err| err.to_string())
}
