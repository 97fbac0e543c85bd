//! Shared test fixtures: a seeded in-memory repository behind a TestServer

use axum_test::TestServer;
use chrono::NaiveDate;
use std::sync::Arc;

use biblio::config::ApiConfig;
use biblio::domain::{Author, Book};
use biblio::server::{build_router, build_state};
use biblio::storage::InMemoryLibraryRepository;

/// The seeded authors, by name, so tests can address them by id
#[allow(dead_code)]
pub struct Seed {
    pub king: Author,
    pub tolkien: Author,
    pub shelley: Author,
    pub le_guin: Author,
    pub jackson: Author,
    pub king_books: Vec<Book>,
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Build a TestServer over a freshly seeded repository
///
/// Five authors with distinct first names, so name sorting has a fully
/// deterministic order, and two books for King.
pub fn setup() -> (TestServer, Seed) {
    let king = Author::new("Stephen", "King", date(1947, 9, 21), "Horror");
    let tolkien = Author::new("John", "Tolkien", date(1892, 1, 3), "Fantasy")
        .with_date_of_death(Some(date(1973, 9, 2)));
    let shelley = Author::new("Mary", "Shelley", date(1797, 8, 30), "Gothic")
        .with_date_of_death(Some(date(1851, 2, 1)));
    let le_guin = Author::new("Ursula", "Le Guin", date(1929, 10, 21), "Science Fiction")
        .with_date_of_death(Some(date(2018, 1, 22)));
    let jackson = Author::new("Shirley", "Jackson", date(1916, 12, 14), "Horror")
        .with_date_of_death(Some(date(1965, 8, 8)));

    let king_books = vec![
        Book::new(king.id, "It", None),
        Book::new(king.id, "The Shining", None),
    ];

    let repository = InMemoryLibraryRepository::new();
    repository
        .seed(
            vec![
                king.clone(),
                tolkien.clone(),
                shelley.clone(),
                le_guin.clone(),
                jackson.clone(),
            ],
            king_books.clone(),
        )
        .expect("seed should succeed");

    let config = ApiConfig::default();
    let state = build_state(Arc::new(repository), &config).expect("state should build");
    let server = TestServer::new(build_router(state, &config.base_path.0));

    (
        server,
        Seed {
            king,
            tolkien,
            shelley,
            le_guin,
            jackson,
            king_books,
        },
    )
}
