//! Small value types shared by the clients.

use std::fmt;

use serde::Serialize;

/// Username/password pair used for HTTP Basic auth on POST requests.
///
/// `Debug` hides the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Outcome of `LibraryClient::book_has_language`.
///
/// A failed search is kept distinct from "the book is not available in
/// that language" so the caller decides how to collapse the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCheck {
    /// The search request came back with a non-ok status.
    NotOk,
    /// Whether the first matching book lists the language.
    Found(bool),
}

impl fmt::Display for LanguageCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageCheck::NotOk => Ok(()),
            LanguageCheck::Found(found) => write!(f, "{found}"),
        }
    }
}

/// Request payload for creating a reading list.
#[derive(Debug, Clone, Serialize)]
pub struct CreateList<'a> {
    pub name: &'a str,
}
