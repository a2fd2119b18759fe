//! Sideload Test Utilities
//!
//! Shared fixture builders and assertions for the sideload test suites.

use serde_json::{json, Map, Value};

/// Builder for creating test records with common patterns
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    /// Create a new record builder
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field with a string value
    pub fn string(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a field with an integer value
    pub fn int(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    /// Add a field with a null value
    pub fn null(mut self, key: &str) -> Self {
        self.fields.insert(key.to_string(), Value::Null);
        self
    }

    /// Add a field with an object value
    pub fn object(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Add a field with an array value
    pub fn array(mut self, key: &str, value: Vec<Value>) -> Self {
        self.fields.insert(key.to_string(), Value::Array(value));
        self
    }

    /// Build the record
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Canned input graphs
pub struct Fixtures;

impl Fixtures {
    /// Root object with two children, each holding grandchildren
    pub fn nested_children() -> Value {
        json!({
            "name": "root",
            "children": [
                { "cid": 1, "name": "child1", "grandchildren": [{ "gid": 1, "title": "grandChild1" }] },
                {
                    "cid": 2,
                    "name": "child2",
                    "grandchildren": [
                        { "gid": 2, "title": "grandChild2" },
                        { "gid": 3, "title": "grandChild3" }
                    ]
                }
            ]
        })
    }

    /// Single object with an array of `foos`
    pub fn foos_object() -> Value {
        json!({
            "property": 100,
            "foos": [{ "fid": 1, "text": "one" }, { "fid": 2, "text": "two" }]
        })
    }

    /// Two objects whose `foos` overlap on `fid` 2
    pub fn foos_array() -> Value {
        json!([
            { "property": 100, "foos": [{ "fid": 1, "text": "one" }, { "fid": 2, "text": "two" }] },
            { "property": 200, "foos": [{ "fid": 2, "text": "two" }, { "fid": 3, "text": "three" }] }
        ])
    }

    /// Single object with two arrays sharing the `fid` space
    pub fn split_foos_object() -> Value {
        json!({
            "property": 100,
            "foosOne": [{ "fid": 1, "text": "one" }, { "fid": 2, "text": "two" }],
            "foosTwo": [{ "fid": 2, "text": "two" }, { "fid": 3, "text": "three" }]
        })
    }

    /// A book with nested metadata and content sections
    pub fn book(id: i64) -> Value {
        RecordBuilder::new()
            .int("id", id)
            .string("title", &format!("Book {}", id))
            .object(
                "metadata",
                json!({
                    "authors": [
                        { "id": id % 7, "name": format!("Author {}", id % 7) },
                        { "id": 100 + id % 3, "name": format!("Editor {}", id % 3) }
                    ],
                    "publisher": { "pid": "p-1", "name": "Acme" }
                }),
            )
            .object(
                "content",
                json!({
                    "chapters": (0..3)
                        .map(|c| json!({ "id": id * 10 + c, "title": format!("Chapter {}", c) }))
                        .collect::<Vec<_>>()
                }),
            )
            .string("internal", "drop me")
            .build()
    }

    /// `count` books sharing a small pool of authors
    pub fn library(count: usize) -> Value {
        Value::Array((0..count as i64).map(Self::book).collect())
    }
}

/// Initialize logging for tests
///
/// Honors `RUST_LOG`; repeated calls are harmless.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Utility functions for test assertions
pub mod assertions {
    use serde_json::Value;

    /// Assert that two JSON values are semantically equal (ignoring formatting)
    pub fn assert_json_equal(actual: &Value, expected: &Value, context: &str) {
        if actual != expected {
            panic!(
                "JSON assertion failed in {}:\nExpected: {}\nActual: {}",
                context,
                serde_json::to_string_pretty(expected).unwrap_or_default(),
                serde_json::to_string_pretty(actual).unwrap_or_default()
            );
        }
    }
}
