//! In-process stand-in for the catalog and library APIs.
//!
//! Serves canned first pages for the catalog's list endpoints, person and
//! film details, the library's author/book search, and authenticated
//! reading-list creation. `Fixtures` controls what is served so tests can
//! inject awkward upstream data.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A person and the ids of the films they appear in.
#[derive(Clone, Debug)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub film_ids: Vec<u32>,
}

#[derive(Clone, Debug)]
pub struct Fixtures {
    pub people: Vec<Person>,
    /// Film documents; a film's id is its 1-based position.
    pub films: Vec<Value>,
    pub species: Vec<Value>,
    pub vehicles: Vec<Value>,
    pub authors: Vec<Value>,
    pub books: Vec<Value>,
    /// Search queries answered with 503 instead of results.
    pub failing_queries: Vec<String>,
    /// Expected `Authorization` header for list creation.
    pub authorization: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            people: vec![
                Person {
                    id: "1".to_string(),
                    name: "Luke Skywalker".to_string(),
                    film_ids: vec![1, 2, 3],
                },
                Person {
                    id: "10".to_string(),
                    name: "Obi-Wan Kenobi".to_string(),
                    film_ids: vec![1, 2, 3],
                },
                Person {
                    id: "83".to_string(),
                    name: "Extra".to_string(),
                    film_ids: vec![],
                },
            ],
            films: vec![
                json!({"title": "A New Hope", "episode_id": 4, "characters": ["c1", "c2", "c3"]}),
                json!({"title": "The Empire Strikes Back", "episode_id": 5, "characters": ["c1", "c2", "c3", "c4"]}),
                json!({"title": "Return of the Jedi", "episode_id": 6, "characters": ["c1", "c2", "c3", "c4", "c5"]}),
            ],
            species: vec![
                json!({"name": "Human", "hair_colors": "blonde, brown, black, red", "eye_colors": "brown, blue, green, hazel, grey, amber"}),
                json!({"name": "Droid", "hair_colors": "n/a", "eye_colors": "n/a"}),
                json!({"name": "Wookie", "hair_colors": "black, brown", "eye_colors": "blue, green, yellow, brown, golden, red"}),
                json!({"name": "Rodian", "hair_colors": "n/a", "eye_colors": "black"}),
            ],
            vehicles: vec![
                json!({"name": "Sand Crawler", "max_atmosphering_speed": "30"}),
                json!({"name": "T-16 skyhopper", "max_atmosphering_speed": "1200"}),
                json!({"name": "X-34 landspeeder", "max_atmosphering_speed": "250"}),
            ],
            authors: vec![
                json!({"name": "Ernest Hemingway", "top_work": "The Old Man and the Sea", "work_count": 288}),
                json!({"name": "J.R.R. Tolkien", "top_work": "The Hobbit", "work_count": 503}),
                json!({"name": "F. Scott Fitzgerald", "top_work": "The Great Gatsby", "work_count": 269}),
            ],
            books: vec![
                json!({"title": "The Old Man and the Sea", "language": ["eng", "ita", "spa"], "id_amazon": ["", "0684801221"]}),
                json!({"title": "The Hobbit", "language": ["eng"], "id_amazon": []}),
            ],
            failing_queries: Vec::new(),
            // "user:pass"
            authorization: "Basic dXNlcjpwYXNz".to_string(),
        }
    }
}

struct Store {
    fixtures: Fixtures,
    lists: Vec<Value>,
}

type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Fixtures::default())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        fixtures,
        lists: Vec::new(),
    }));
    Router::new()
        .route("/api/people/{id}/", get(get_person))
        .route("/api/films/", get(list_films))
        .route("/api/films/{id}/", get(get_film))
        .route("/api/species/", get(list_species))
        .route("/api/vehicles/", get(list_vehicles))
        .route("/search/authors.json", get(search_authors))
        .route("/search.json", get(search_books))
        .route("/people/{username}/lists", post(create_list))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures)).await
}

fn first_page(results: &[Value]) -> Json<Value> {
    Json(json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    }))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))).into_response()
}

async fn get_person(State(db): State<Db>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    let store = db.read().await;
    let Some(person) = store.fixtures.people.iter().find(|p| p.id == id) else {
        return not_found();
    };
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let films: Vec<String> = person
        .film_ids
        .iter()
        .map(|n| format!("http://{host}/api/films/{n}/"))
        .collect();
    Json(json!({"name": person.name, "films": films})).into_response()
}

async fn list_films(State(db): State<Db>) -> Json<Value> {
    first_page(&db.read().await.fixtures.films)
}

async fn get_film(State(db): State<Db>, Path(id): Path<usize>) -> Response {
    let store = db.read().await;
    match id.checked_sub(1).and_then(|i| store.fixtures.films.get(i)) {
        Some(film) => Json(film.clone()).into_response(),
        None => not_found(),
    }
}

async fn list_species(State(db): State<Db>) -> Json<Value> {
    first_page(&db.read().await.fixtures.species)
}

async fn list_vehicles(State(db): State<Db>) -> Json<Value> {
    first_page(&db.read().await.fixtures.vehicles)
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

fn search(docs: &[Value], key: &str, fixtures: &Fixtures, q: &str) -> Response {
    if fixtures.failing_queries.iter().any(|f| f == q) {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response();
    }
    let needle = q.to_lowercase();
    let hits: Vec<&Value> = docs
        .iter()
        .filter(|doc| {
            doc.get(key)
                .and_then(Value::as_str)
                .is_some_and(|v| !needle.is_empty() && v.to_lowercase().contains(&needle))
        })
        .collect();
    Json(json!({"numFound": hits.len(), "start": 0, "docs": hits})).into_response()
}

async fn search_authors(State(db): State<Db>, Query(query): Query<SearchQuery>) -> Response {
    let store = db.read().await;
    search(&store.fixtures.authors, "name", &store.fixtures, &query.q)
}

async fn search_books(State(db): State<Db>, Query(query): Query<SearchQuery>) -> Response {
    let store = db.read().await;
    search(&store.fixtures.books, "title", &store.fixtures, &query.q)
}

#[derive(Deserialize)]
pub struct CreateList {
    pub name: String,
}

async fn create_list(
    State(db): State<Db>,
    Path(username): Path<String>,
    headers: HeaderMap,
    Json(input): Json<CreateList>,
) -> Response {
    let mut store = db.write().await;
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == store.fixtures.authorization);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"}))).into_response();
    }
    let key = format!("/people/{username}/lists/OL{}L", store.lists.len() + 1);
    let list = json!({"key": key, "name": input.name});
    store.lists.push(list.clone());
    (StatusCode::OK, Json(list)).into_response()
}
