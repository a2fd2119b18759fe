//! Identifier keys used to compare sideloaded entries

use serde_json::{Number, Value};

/// Hashable identity of a primitive identifier value
///
/// Identifiers compare by value and type, so `1` and `"1"` are different keys
/// while `1` and `1.0` are the same. Arrays and objects have no key: they are
/// never considered equal to one another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdKey {
    /// `null` identifier
    Null,
    /// Boolean identifier
    Bool(bool),
    /// Numeric identifier in normalized text form
    Number(String),
    /// String identifier
    String(String),
}

impl IdKey {
    /// Build the key for an identifier value, or `None` for arrays and objects
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(IdKey::Null),
            Value::Bool(b) => Some(IdKey::Bool(*b)),
            Value::Number(n) => Some(IdKey::Number(normalize_number(n))),
            Value::String(s) => Some(IdKey::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Integral floats collapse onto their integer spelling
fn normalize_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
