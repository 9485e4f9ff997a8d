//! Error types for the catalog and library clients.
//!
//! # Design
//! A non-ok HTTP status is not an error here: the query methods turn it into
//! their documented "no data" value. What remains are the failures a caller
//! may want to tolerate or reject explicitly: upstream data that cannot be
//! interpreted (`Parse`, `Deserialization`), aggregates over nothing
//! (`EmptyInput`), and the transport itself failing where no sentinel exists.

use thiserror::Error;

/// Errors returned by `CatalogClient` and `LibraryClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The round-trip itself failed (DNS, connect, timeout, body read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A field that must hold an integer held something else, e.g. the
    /// catalog's `"unknown"` vehicle speeds.
    #[error("field `{field}` is not an integer: {value:?}")]
    Parse { field: &'static str, value: String },

    /// An aggregate (max, mean, argmax) was requested over zero elements.
    #[error("{operation} requires at least one element")]
    EmptyInput { operation: &'static str },

    /// The response body is not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
