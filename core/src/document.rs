//! Lenient field access over untyped JSON documents.
//!
//! # Design
//! Upstream payloads are read as `serde_json::Value` rather than typed DTOs:
//! the clients only ever touch a handful of fields, and a missing key or a
//! value of the wrong type must yield a default instead of an error. Every
//! accessor here is total. The few places where bad data is allowed to fail
//! do so explicitly in the client code.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Parse a response body. An empty body is "no document"; anything else
/// must be JSON.
pub fn parse_document(response: &HttpResponse) -> Result<Option<Value>, ApiError> {
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Whether a document carries anything at all. `null`, `false`, `0`, `""`,
/// `[]` and `{}` are all considered empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// String field, or `default` when absent or not a string.
pub fn field_str<'a>(doc: &'a Value, key: &str, default: &'a str) -> &'a str {
    doc.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// Array field, or an empty slice when absent or not an array.
pub fn field_array<'a>(doc: &'a Value, key: &str) -> &'a [Value] {
    doc.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Integer field, or `default` when absent or not an integer.
pub fn field_i64(doc: &Value, key: &str, default: i64) -> i64 {
    doc.get(key).and_then(Value::as_i64).unwrap_or(default)
}

/// First element of the `docs` array of a search response, or an empty
/// object when there are no results.
pub fn first_doc(doc: &Value) -> Value {
    field_array(doc, "docs")
        .first()
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()))
}
