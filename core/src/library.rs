//! Client for the book-search/author library API.
//!
//! # Design
//! Same build/parse split as the catalog client. Every request carries a
//! JSON content type; only the list-creation POST carries credentials.
//! Search responses are read through their first `docs` entry, defaulting
//! to an empty document when there are no hits.

use tracing::debug;

use crate::document::{field_array, field_i64, field_str, first_doc, parse_document};
use crate::error::ApiError;
use crate::http::{basic_auth_value, encode_component, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{fetch_ok, Transport};
use crate::types::{CreateList, Credentials, LanguageCheck};

pub const DEFAULT_LIBRARY_URL: &str = "https://openlibrary.org";

const AMAZON_PRODUCT_URL: &str = "https://www.amazon.com/dp/";

#[derive(Debug, Clone)]
pub struct LibraryClient {
    base_url: String,
    credentials: Option<Credentials>,
}

impl Default for LibraryClient {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_URL, None)
    }
}

impl LibraryClient {
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn json_get(&self, path: String) -> HttpRequest {
        HttpRequest::get(path).with_header("content-type", "application/json")
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_search_authors(&self, author_name: &str) -> HttpRequest {
        self.json_get(format!(
            "{}/search/authors.json?q={}",
            self.base_url,
            encode_component(author_name)
        ))
    }

    pub fn build_search_books(&self, book_name: &str) -> HttpRequest {
        self.json_get(format!(
            "{}/search.json?q={}",
            self.base_url,
            encode_component(book_name)
        ))
    }

    /// POST request creating a reading list for `username`, authenticated
    /// with the client's credentials when it has any.
    pub fn build_create_book_list(&self, username: &str, list_name: &str) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&CreateList { name: list_name })
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut request = HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/people/{}/lists", self.base_url, encode_component(username)),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        };
        if let Some(creds) = &self.credentials {
            request = request.with_header(
                "authorization",
                basic_auth_value(&creds.username, &creds.password),
            );
        }
        Ok(request)
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_top_work(&self, response: &HttpResponse) -> Result<String, ApiError> {
        if !response.is_ok() {
            return Ok(String::new());
        }
        let author = first_result(response)?;
        Ok(field_str(&author, "top_work", "").to_string())
    }

    pub fn parse_language_check(&self, response: &HttpResponse, lang: &str) -> Result<LanguageCheck, ApiError> {
        if !response.is_ok() {
            return Ok(LanguageCheck::NotOk);
        }
        let book = first_result(response)?;
        let listed = field_array(&book, "language")
            .iter()
            .any(|l| l.as_str() == Some(lang));
        Ok(LanguageCheck::Found(listed))
    }

    pub fn parse_amazon_link(&self, response: &HttpResponse) -> Result<String, ApiError> {
        if !response.is_ok() {
            return Ok(String::new());
        }
        let book = first_result(response)?;
        let amazon_id = field_array(&book, "id_amazon")
            .iter()
            .filter_map(|id| id.as_str())
            .find(|id| !id.is_empty())
            .unwrap_or("");
        Ok(format!("{AMAZON_PRODUCT_URL}{amazon_id}"))
    }

    /// The resolved author name and work count from an author search, or
    /// `None` when the search was not ok.
    pub fn parse_author_work_count(&self, response: &HttpResponse) -> Result<Option<(String, i64)>, ApiError> {
        if !response.is_ok() {
            return Ok(None);
        }
        let author = first_result(response)?;
        Ok(Some((
            field_str(&author, "name", "").to_string(),
            field_i64(&author, "work_count", 0),
        )))
    }

    pub fn parse_create_book_list(&self, response: &HttpResponse) -> u16 {
        response.status
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get_top_work_of_author(&self, transport: &impl Transport, author_name: &str) -> Result<String, ApiError> {
        match fetch_ok(transport, self.build_search_authors(author_name)) {
            Some(response) => self.parse_top_work(&response),
            None => Ok(String::new()),
        }
    }

    pub fn book_has_language(
        &self,
        transport: &impl Transport,
        book_name: &str,
        lang: &str,
    ) -> Result<LanguageCheck, ApiError> {
        match fetch_ok(transport, self.build_search_books(book_name)) {
            Some(response) => self.parse_language_check(&response, lang),
            None => Ok(LanguageCheck::NotOk),
        }
    }

    /// Amazon product link for the first search hit. A hit without an
    /// Amazon id still yields the bare product prefix.
    pub fn get_amazon_link(&self, transport: &impl Transport, book_name: &str) -> Result<String, ApiError> {
        match fetch_ok(transport, self.build_search_books(book_name)) {
            Some(response) => self.parse_amazon_link(&response),
            None => Ok(String::new()),
        }
    }

    /// Resolved name of the author with the most works.
    ///
    /// Searches run one at a time in input order. The first non-ok search
    /// aborts the comparison with `""` and no further requests are made.
    /// Inputs resolving to the same author name collapse into one entry
    /// holding the last count seen. Ties go to the first-resolved name.
    pub fn compare_authors<S: AsRef<str>>(
        &self,
        transport: &impl Transport,
        author_names: &[S],
    ) -> Result<String, ApiError> {
        let mut counts: Vec<(String, i64)> = Vec::with_capacity(author_names.len());
        for author_name in author_names {
            let author_name: &str = author_name.as_ref();
            let Some(response) = fetch_ok(transport, self.build_search_authors(author_name)) else {
                debug!(author = author_name, "aborting author comparison");
                return Ok(String::new());
            };
            let Some((resolved, work_count)) = self.parse_author_work_count(&response)? else {
                return Ok(String::new());
            };
            match counts.iter_mut().find(|(name, _)| *name == resolved) {
                Some(entry) => entry.1 = work_count,
                None => counts.push((resolved, work_count)),
            }
        }

        let mut top: Option<&(String, i64)> = None;
        for entry in &counts {
            if top.map_or(true, |best| entry.1 > best.1) {
                top = Some(entry);
            }
        }
        top.map(|(name, _)| name.clone()).ok_or(ApiError::EmptyInput {
            operation: "author comparison",
        })
    }

    /// Create a reading list and return the raw status code. Interpreting
    /// the status is up to the caller.
    pub fn create_book_list(
        &self,
        transport: &impl Transport,
        username: &str,
        list_name: &str,
    ) -> Result<u16, ApiError> {
        let request = self.build_create_book_list(username, list_name)?;
        debug!(url = %request.path, authenticated = self.credentials.is_some(), "creating book list");
        let response = transport.execute(request)?;
        Ok(self.parse_create_book_list(&response))
    }
}

fn first_result(response: &HttpResponse) -> Result<serde_json::Value, ApiError> {
    Ok(parse_document(response)?
        .map(|doc| first_doc(&doc))
        .unwrap_or_else(|| serde_json::Value::Object(Default::default())))
}
