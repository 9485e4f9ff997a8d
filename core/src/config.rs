//! Connection settings for both clients.
//!
//! The only recognised options are the two base URLs, the request timeout
//! and the library credentials. Defaults point at the public services.

use std::time::Duration;

use crate::catalog::{CatalogClient, DEFAULT_CATALOG_URL};
use crate::library::{LibraryClient, DEFAULT_LIBRARY_URL};
use crate::transport::{UreqTransport, DEFAULT_TIMEOUT};
use crate::types::Credentials;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub catalog_url: String,
    pub library_url: String,
    pub timeout: Duration,
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            library_url: DEFAULT_LIBRARY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
        }
    }
}

impl ClientConfig {
    pub fn catalog_client(&self) -> CatalogClient {
        CatalogClient::new(&self.catalog_url)
    }

    pub fn library_client(&self) -> LibraryClient {
        LibraryClient::new(&self.library_url, self.credentials.clone())
    }

    pub fn transport(&self) -> UreqTransport {
        UreqTransport::new(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_services() {
        let config = ClientConfig::default();
        assert_eq!(config.catalog_client().base_url(), "https://swapi.dev/api");
        assert_eq!(config.library_client().base_url(), "https://openlibrary.org");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn overrides_flow_into_clients() {
        let config = ClientConfig {
            catalog_url: "http://127.0.0.1:9000/api/".to_string(),
            library_url: "http://127.0.0.1:9001".to_string(),
            credentials: Some(Credentials::new("u", "p")),
            ..ClientConfig::default()
        };
        assert_eq!(config.catalog_client().base_url(), "http://127.0.0.1:9000/api");
        let req = config
            .library_client()
            .build_create_book_list("u", "l")
            .unwrap();
        assert_eq!(req.path, "http://127.0.0.1:9001/people/u/lists");
        assert!(req.header("authorization").is_some());
    }
}
