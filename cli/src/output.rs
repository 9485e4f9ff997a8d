//! Rendering of query results for the console.

use apiquery_core::{ApiError, LanguageCheck};

/// One printable line per query result.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl Render for Option<i64> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.to_string(),
            None => "None".to_string(),
        }
    }
}

impl Render for Vec<String> {
    fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Render for LanguageCheck {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for u16 {
    fn render(&self) -> String {
        self.to_string()
    }
}

/// Render a result, or the error in its place.
pub fn render_result<T: Render>(result: &Result<T, ApiError>) -> String {
    match result {
        Ok(value) => value.render(),
        Err(e) => format!("error: {e}"),
    }
}
