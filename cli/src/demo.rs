//! The scripted tour of every query against the public services.

use std::io::{self, Write};

use apiquery_core::{ApiError, CatalogClient, LibraryClient, Transport};
use tracing::info;

use crate::output::{render_result, Render};
use crate::pacing::Pacer;

pub const DEMO_PERSON_ID: &str = "10";
pub const DEMO_HAIR_COLOR: &str = "brown";
pub const DEMO_AUTHOR: &str = "Hemingway";
pub const DEMO_BOOK: &str = "The Old Man and the Sea";
pub const DEMO_LANGUAGE: &str = "ita";
pub const DEMO_COMPARED_AUTHORS: [&str; 3] = ["Hemingway", "Tolkien", "Fitzgerald"];

/// Runs the demo sequence, writing one line per query to `out`.
///
/// A query failing with bad data prints an `error:` line and the sequence
/// carries on. The pacer runs between queries, not after the last one.
pub struct Demo<'a, T, P> {
    pub catalog: &'a CatalogClient,
    pub library: &'a LibraryClient,
    pub transport: &'a T,
    pub pacer: &'a P,
}

impl<T: Transport, P: Pacer> Demo<'_, T, P> {
    pub fn run(&self, out: &mut impl Write) -> io::Result<()> {
        let (catalog, library, t) = (self.catalog, self.library, self.transport);

        self.step(out, "average character count", catalog.get_average_character_count(t))?;
        self.pacer.pause();
        self.step(
            out,
            "species by hair color",
            catalog.get_species_by_hair_color(t, DEMO_HAIR_COLOR),
        )?;
        self.pacer.pause();
        self.step(out, "eye colors", catalog.get_all_eye_colors(t))?;
        self.pacer.pause();
        self.step(out, "max speed", catalog.get_max_speed(t))?;
        self.pacer.pause();
        self.step(
            out,
            "first film",
            catalog.get_first_film_title(t, DEMO_PERSON_ID),
        )?;
        self.pacer.pause();

        self.step(out, "top work", library.get_top_work_of_author(t, DEMO_AUTHOR))?;
        self.pacer.pause();
        self.step(
            out,
            "book language",
            library.book_has_language(t, DEMO_BOOK, DEMO_LANGUAGE),
        )?;
        self.pacer.pause();
        self.step(
            out,
            "compare authors",
            library.compare_authors(t, &DEMO_COMPARED_AUTHORS),
        )?;

        writeln!(out, "Thank You!")
    }

    fn step<R: Render>(&self, out: &mut impl Write, label: &str, result: Result<R, ApiError>) -> io::Result<()> {
        let line = render_result(&result);
        info!(query = label, ok = result.is_ok(), "demo query finished");
        writeln!(out, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use apiquery_core::{HttpRequest, HttpResponse};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    /// Answers by URL substring; anything unmatched is a 404.
    struct RoutedTransport {
        routes: Vec<(&'static str, u16, Value)>,
        seen: RefCell<Vec<String>>,
    }

    impl Transport for RoutedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.path.clone());
            let hit = self
                .routes
                .iter()
                .find(|(fragment, _, _)| request.path.contains(fragment));
            Ok(match hit {
                Some((_, status, body)) => HttpResponse::new(*status, body.to_string()),
                None => HttpResponse::new(404, "{}"),
            })
        }
    }

    #[derive(Default)]
    struct CountingPacer {
        pauses: Cell<usize>,
    }

    impl Pacer for CountingPacer {
        fn pause(&self) {
            self.pauses.set(self.pauses.get() + 1);
        }
    }

    fn routes() -> Vec<(&'static str, u16, Value)> {
        vec![
            ("/api/films/1/", 200, json!({"title": "A New Hope"})),
            (
                "/api/films/",
                200,
                json!({"results": [{"characters": [1, 2, 3]}, {"characters": [1, 2, 3, 4]}]}),
            ),
            (
                "/api/species/",
                200,
                json!({"results": [{"name": "Wookie", "hair_colors": "brown", "eye_colors": "blue"}]}),
            ),
            (
                "/api/vehicles/",
                200,
                json!({"results": [{"max_atmosphering_speed": "unknown"}]}),
            ),
            (
                "/api/people/10/",
                200,
                json!({"films": ["http://catalog.test/api/films/1/"]}),
            ),
            (
                "q=Hemingway",
                200,
                json!({"docs": [{"name": "Ernest Hemingway", "top_work": "The Old Man and the Sea", "work_count": 288}]}),
            ),
            (
                "search.json?q=The%20Old",
                200,
                json!({"docs": [{"language": ["eng", "ita"]}]}),
            ),
            (
                "q=Tolkien",
                200,
                json!({"docs": [{"name": "J.R.R. Tolkien", "work_count": 503}]}),
            ),
            (
                "q=Fitzgerald",
                200,
                json!({"docs": [{"name": "F. Scott Fitzgerald", "work_count": 269}]}),
            ),
        ]
    }

    #[test]
    fn demo_prints_every_result_and_continues_past_errors() {
        let transport = RoutedTransport {
            routes: routes(),
            seen: RefCell::new(Vec::new()),
        };
        let pacer = CountingPacer::default();
        let catalog = CatalogClient::new("http://catalog.test/api");
        let library = LibraryClient::new("http://library.test", None);
        let demo = Demo {
            catalog: &catalog,
            library: &library,
            transport: &transport,
            pacer: &pacer,
        };

        let mut out = Vec::new();
        demo.run(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();

        assert_eq!(
            lines,
            vec![
                "3",
                r#"["Wookie"]"#,
                r#"["blue"]"#,
                r#"error: field `max_atmosphering_speed` is not an integer: "unknown""#,
                "A New Hope",
                "The Old Man and the Sea",
                "true",
                "J.R.R. Tolkien",
                "Thank You!",
            ]
        );
        assert_eq!(pacer.pauses.get(), 7);
        assert_eq!(transport.seen.borrow().len(), 11);
    }

    #[test]
    fn demo_prints_sentinels_when_everything_fails() {
        let transport = RoutedTransport {
            routes: Vec::new(),
            seen: RefCell::new(Vec::new()),
        };
        let pacer = CountingPacer::default();
        let catalog = CatalogClient::new("http://catalog.test/api");
        let library = LibraryClient::new("http://library.test", None);
        let demo = Demo {
            catalog: &catalog,
            library: &library,
            transport: &transport,
            pacer: &pacer,
        };

        let mut out = Vec::new();
        demo.run(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();

        assert_eq!(lines, vec!["None", "[]", "[]", "None", "", "", "", "", "Thank You!"]);
        // compare_authors stops at the first failed search.
        assert_eq!(transport.seen.borrow().len(), 8);
    }
}
