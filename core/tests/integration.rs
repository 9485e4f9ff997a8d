//! End-to-end queries against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every query through
//! `UreqTransport` over real HTTP. Covers URL building, query encoding,
//! link following and Basic auth as the server actually sees them.

use std::time::Duration;

use apiquery_core::{ApiError, CatalogClient, Credentials, LanguageCheck, LibraryClient, UreqTransport};
use mock_server::Fixtures;
use serde_json::json;

/// Serve `fixtures` on a random local port and return `http://host:port`.
fn start_server(fixtures: Fixtures) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, fixtures).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn transport() -> UreqTransport {
    UreqTransport::new(Duration::from_secs(5))
}

#[test]
fn catalog_queries() {
    let base = start_server(Fixtures::default());
    let catalog = CatalogClient::new(&format!("{base}/api"));
    let t = transport();

    assert_eq!(catalog.get_first_film_title(&t, "10").unwrap(), "A New Hope");
    assert_eq!(catalog.get_first_film_title(&t, "83").unwrap(), "");
    assert_eq!(catalog.get_first_film_title(&t, "999").unwrap(), "");

    assert_eq!(catalog.get_max_speed(&t).unwrap(), Some(1200));
    assert_eq!(catalog.get_average_character_count(&t).unwrap(), Some(4));

    let mut hairy = catalog.get_species_by_hair_color(&t, "brown").unwrap();
    hairy.sort();
    assert_eq!(hairy, vec!["Human", "Wookie"]);

    let colors = catalog.get_all_eye_colors(&t).unwrap();
    assert!(colors.contains(&"hazel".to_string()));
    assert!(colors.contains(&"black".to_string()));
    assert!(!colors.contains(&"n/a".to_string()));
    let mut deduped = colors.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), colors.len());
}

#[test]
fn catalog_surfaces_bad_upstream_data() {
    let base = start_server(Fixtures {
        vehicles: vec![
            json!({"name": "Known", "max_atmosphering_speed": "100"}),
            json!({"name": "Mystery", "max_atmosphering_speed": "unknown"}),
        ],
        films: Vec::new(),
        ..Fixtures::default()
    });
    let catalog = CatalogClient::new(&format!("{base}/api"));
    let t = transport();

    assert!(matches!(catalog.get_max_speed(&t).unwrap_err(), ApiError::Parse { .. }));
    assert!(matches!(
        catalog.get_average_character_count(&t).unwrap_err(),
        ApiError::EmptyInput { .. }
    ));
}

#[test]
fn library_queries() {
    let base = start_server(Fixtures::default());
    let library = LibraryClient::new(&base, None);
    let t = transport();

    assert_eq!(
        library.get_top_work_of_author(&t, "Hemingway").unwrap(),
        "The Old Man and the Sea"
    );
    assert_eq!(
        library.book_has_language(&t, "The Old Man and the Sea", "ita").unwrap(),
        LanguageCheck::Found(true)
    );
    assert_eq!(
        library.book_has_language(&t, "The Hobbit", "ita").unwrap(),
        LanguageCheck::Found(false)
    );
    assert_eq!(
        library.get_amazon_link(&t, "The Old Man and the Sea").unwrap(),
        "https://www.amazon.com/dp/0684801221"
    );
    assert_eq!(
        library.get_amazon_link(&t, "The Hobbit").unwrap(),
        "https://www.amazon.com/dp/"
    );
    assert_eq!(
        library
            .compare_authors(&t, &["Hemingway", "Tolkien", "Fitzgerald"])
            .unwrap(),
        "J.R.R. Tolkien"
    );
}

#[test]
fn library_aborts_comparison_on_failed_search() {
    let base = start_server(Fixtures {
        failing_queries: vec!["Tolkien".to_string()],
        ..Fixtures::default()
    });
    let library = LibraryClient::new(&base, None);
    let t = transport();

    assert_eq!(
        library
            .compare_authors(&t, &["Hemingway", "Tolkien", "Fitzgerald"])
            .unwrap(),
        ""
    );
    assert_eq!(
        library.book_has_language(&t, "Tolkien", "eng").unwrap(),
        LanguageCheck::NotOk
    );
}

#[test]
fn create_book_list_reports_raw_status() {
    let base = start_server(Fixtures::default());
    let t = transport();

    let authed = LibraryClient::new(&base, Some(Credentials::new("user", "pass")));
    assert_eq!(authed.create_book_list(&t, "reader", "Summer").unwrap(), 200);

    let anonymous = LibraryClient::new(&base, None);
    assert_eq!(anonymous.create_book_list(&t, "reader", "Summer").unwrap(), 401);
}

#[test]
fn unreachable_server_yields_sentinels() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let t = transport();
    let catalog = CatalogClient::new(&format!("http://{addr}/api"));
    let library = LibraryClient::new(&format!("http://{addr}"), None);

    assert_eq!(catalog.get_max_speed(&t).unwrap(), None);
    assert_eq!(library.get_top_work_of_author(&t, "Hemingway").unwrap(), "");
    assert!(matches!(
        library.create_book_list(&t, "reader", "Summer").unwrap_err(),
        ApiError::Transport(_)
    ));
}
