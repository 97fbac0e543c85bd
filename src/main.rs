//! Library API server
//!
//! Boots the in-memory repository with demo data and serves the authors API.

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

use biblio::config::ApiConfig;
use biblio::domain::{Author, Book};
use biblio::server::{build_router, build_state};
use biblio::storage::InMemoryLibraryRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; RUST_LOG controls the filter
    tracing_subscriber::fmt::init();

    let config = ApiConfig::load()?;

    let repository = InMemoryLibraryRepository::new();
    seed_demo_data(&repository)?;

    let state = build_state(Arc::new(repository), &config)?;
    let app = build_router(state, &config.base_path.0);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Library API listening on http://{}{}", addr, config.base_path.0);

    axum::serve(listener, app).await?;

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid demo date")
}

fn seed_demo_data(repository: &InMemoryLibraryRepository) -> Result<()> {
    let king = Author::new("Stephen", "King", date(1947, 9, 21), "Horror");
    let tolkien = Author::new("John", "Tolkien", date(1892, 1, 3), "Fantasy")
        .with_date_of_death(Some(date(1973, 9, 2)));
    let shelley = Author::new("Mary", "Shelley", date(1797, 8, 30), "Gothic")
        .with_date_of_death(Some(date(1851, 2, 1)));
    let le_guin = Author::new("Ursula", "Le Guin", date(1929, 10, 21), "Science Fiction")
        .with_date_of_death(Some(date(2018, 1, 22)));
    let jackson = Author::new("Shirley", "Jackson", date(1916, 12, 14), "Horror")
        .with_date_of_death(Some(date(1965, 8, 8)));

    let books = vec![
        Book::new(king.id, "It", Some("A shape-shifting evil surfaces every 27 years".into())),
        Book::new(king.id, "The Shining", None),
        Book::new(tolkien.id, "The Hobbit", None),
        Book::new(tolkien.id, "The Fellowship of the Ring", None),
        Book::new(shelley.id, "Frankenstein", Some("The modern Prometheus".into())),
        Book::new(le_guin.id, "A Wizard of Earthsea", None),
        Book::new(jackson.id, "The Haunting of Hill House", None),
    ];

    let authors = vec![king, tolkien, shelley, le_guin, jackson];
    let count = authors.len();
    repository.seed(authors, books)?;

    tracing::info!(authors = count, "demo data seeded");
    Ok(())
}
