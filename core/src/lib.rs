//! Synchronous query clients for a film/people catalog API and a
//! book-search library API.
//!
//! # Overview
//! `CatalogClient` and `LibraryClient` build `HttpRequest` values and
//! interpret `HttpResponse` values. The round-trip itself goes through a
//! `Transport`, so every query can be exercised against scripted responses
//! and the blocking `UreqTransport` is only one implementation.
//!
//! # Design
//! - Clients hold a base URL (and, for the library, optional credentials)
//!   and nothing else; every query is a pure function of its inputs and the
//!   responses it receives.
//! - Non-ok responses become "no data" values (`""`, `[]`, `None`,
//!   `LanguageCheck::NotOk`). Bad upstream data and aggregates over nothing
//!   are reported as `ApiError` variants instead.
//! - Payloads are read as untyped JSON through total accessors in
//!   `document`.

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod library;
pub mod transport;
pub mod types;

pub use catalog::CatalogClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use library::LibraryClient;
pub use transport::{Transport, UreqTransport};
pub use types::{Credentials, LanguageCheck};
