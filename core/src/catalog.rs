//! Client for the film/people catalog API.
//!
//! # Design
//! `CatalogClient` holds only a base URL. Each query is a `build_*` method
//! producing an `HttpRequest`, a `parse_*` method interpreting the response,
//! and a query method that wires the two through a `Transport`.
//!
//! List endpoints are paginated upstream; only the first page is ever read
//! and `next` links are ignored.

use std::collections::HashSet;

use serde_json::Value;

use crate::document::{field_array, field_str, is_truthy, parse_document};
use crate::error::ApiError;
use crate::http::{encode_component, HttpRequest, HttpResponse};
use crate::transport::{fetch_ok, Transport};

pub const DEFAULT_CATALOG_URL: &str = "https://swapi.dev/api";

/// Species that have no eyes report this instead of a color list.
const NOT_APPLICABLE: &str = "n/a";

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_get_person(&self, person_id: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/people/{}/",
            self.base_url,
            encode_component(person_id)
        ))
    }

    /// Film references in a person document are absolute URLs and are
    /// followed as given.
    pub fn build_get_film(&self, film_url: &str) -> HttpRequest {
        HttpRequest::get(film_url)
    }

    pub fn build_list_films(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/films/", self.base_url))
    }

    pub fn build_list_species(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/species/", self.base_url))
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/vehicles/", self.base_url))
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    /// URL of the person's first film, or `None` when the person could not
    /// be read or appears in no film.
    pub fn parse_first_film_url(&self, response: &HttpResponse) -> Result<Option<String>, ApiError> {
        let Some(doc) = ok_document(response)? else {
            return Ok(None);
        };
        Ok(field_array(&doc, "films")
            .first()
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string))
    }

    pub fn parse_film_title(&self, response: &HttpResponse) -> Result<String, ApiError> {
        if !response.is_ok() {
            return Ok(String::new());
        }
        Ok(parse_document(response)?
            .map(|doc| field_str(&doc, "title", "").to_string())
            .unwrap_or_default())
    }

    /// Highest `max_atmosphering_speed` on the first vehicle page.
    ///
    /// Every vehicle's speed must be an integer; the upstream data contains
    /// `"unknown"` for some vehicles, which fails with `ApiError::Parse`.
    pub fn parse_max_speed(&self, response: &HttpResponse) -> Result<Option<i64>, ApiError> {
        let Some(doc) = ok_document(response)? else {
            return Ok(None);
        };
        let speeds = field_array(&doc, "results")
            .iter()
            .map(|vehicle| parse_speed(vehicle.get("max_atmosphering_speed")))
            .collect::<Result<Vec<_>, _>>()?;
        speeds
            .into_iter()
            .max()
            .map(Some)
            .ok_or(ApiError::EmptyInput {
                operation: "max speed",
            })
    }

    /// Distinct eye colors across the first species page, in no particular
    /// order.
    pub fn parse_eye_colors(&self, response: &HttpResponse) -> Result<Vec<String>, ApiError> {
        let Some(doc) = ok_document(response)? else {
            return Ok(Vec::new());
        };
        let colors: HashSet<String> = field_array(&doc, "results")
            .iter()
            .map(|species| field_str(species, "eye_colors", ""))
            .filter(|colors| *colors != NOT_APPLICABLE)
            .flat_map(|colors| colors.split(','))
            .map(|color| color.trim().to_string())
            .collect();
        Ok(colors.into_iter().collect())
    }

    /// Names of species whose `hair_colors` contains `color` as a
    /// case-sensitive substring.
    ///
    /// Species sharing a name collapse to one entry: the name keeps its
    /// first position and the last-seen hair colors.
    pub fn parse_species_by_hair_color(
        &self,
        response: &HttpResponse,
        color: &str,
    ) -> Result<Vec<String>, ApiError> {
        let Some(doc) = ok_document(response)? else {
            return Ok(Vec::new());
        };
        let mut by_name: Vec<(&str, &str)> = Vec::new();
        for species in field_array(&doc, "results") {
            let name = field_str(species, "name", "");
            let hair_colors = field_str(species, "hair_colors", "");
            match by_name.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = hair_colors,
                None => by_name.push((name, hair_colors)),
            }
        }
        Ok(by_name
            .into_iter()
            .filter(|(_, hair_colors)| hair_colors.contains(color))
            .map(|(name, _)| name.to_string())
            .collect())
    }

    /// Mean number of characters per film on the first film page, truncated
    /// toward zero.
    pub fn parse_average_character_count(&self, response: &HttpResponse) -> Result<Option<i64>, ApiError> {
        let Some(doc) = ok_document(response)? else {
            return Ok(None);
        };
        let films = field_array(&doc, "results");
        if films.is_empty() {
            return Err(ApiError::EmptyInput {
                operation: "average character count",
            });
        }
        let total: usize = films
            .iter()
            .map(|film| field_array(film, "characters").len())
            .sum();
        Ok(Some((total / films.len()) as i64))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Title of the first film a person appears in, or `""` if either
    /// lookup fails or the person has no films.
    pub fn get_first_film_title(&self, transport: &impl Transport, person_id: &str) -> Result<String, ApiError> {
        let Some(response) = fetch_ok(transport, self.build_get_person(person_id)) else {
            return Ok(String::new());
        };
        let Some(film_url) = self.parse_first_film_url(&response)? else {
            return Ok(String::new());
        };
        match fetch_ok(transport, self.build_get_film(&film_url)) {
            Some(response) => self.parse_film_title(&response),
            None => Ok(String::new()),
        }
    }

    pub fn get_max_speed(&self, transport: &impl Transport) -> Result<Option<i64>, ApiError> {
        match fetch_ok(transport, self.build_list_vehicles()) {
            Some(response) => self.parse_max_speed(&response),
            None => Ok(None),
        }
    }

    pub fn get_all_eye_colors(&self, transport: &impl Transport) -> Result<Vec<String>, ApiError> {
        match fetch_ok(transport, self.build_list_species()) {
            Some(response) => self.parse_eye_colors(&response),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_species_by_hair_color(&self, transport: &impl Transport, color: &str) -> Result<Vec<String>, ApiError> {
        match fetch_ok(transport, self.build_list_species()) {
            Some(response) => self.parse_species_by_hair_color(&response, color),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_average_character_count(&self, transport: &impl Transport) -> Result<Option<i64>, ApiError> {
        match fetch_ok(transport, self.build_list_films()) {
            Some(response) => self.parse_average_character_count(&response),
            None => Ok(None),
        }
    }
}

/// The response document when the response is ok and carries a non-empty
/// document, `None` otherwise.
fn ok_document(response: &HttpResponse) -> Result<Option<Value>, ApiError> {
    if !response.is_ok() {
        return Ok(None);
    }
    Ok(parse_document(response)?.filter(is_truthy))
}

fn parse_speed(value: Option<&Value>) -> Result<i64, ApiError> {
    let invalid = |value: String| ApiError::Parse {
        field: "max_atmosphering_speed",
        value,
    };
    match value {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| invalid(n.to_string())),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid(s.clone())),
        // A missing field reads as an empty string, which is not a number.
        None => Err(invalid(String::new())),
        Some(other) => Err(invalid(other.to_string())),
    }
}
