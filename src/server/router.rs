//! Route table for the library API

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    block_author, create_author, create_book_for_author, delete_author, get_author,
    get_book_for_author, list_authors, list_books_for_author,
};
use super::state::AppState;

/// Build the application router, mounted under `base_path`
///
/// - GET    {base}/authors                                - List authors (paged, sortable, shapeable)
/// - POST   {base}/authors                                - Create an author (payload gated on Content-Type)
/// - GET    {base}/authors/{author_id}                    - Get one author (shapeable)
/// - POST   {base}/authors/{author_id}                    - Creation guard (409 on existing)
/// - DELETE {base}/authors/{author_id}                    - Delete an author and their books
/// - GET    {base}/authors/{author_id}/books              - List an author's books
/// - POST   {base}/authors/{author_id}/books              - Create a book for an author
/// - GET    {base}/authors/{author_id}/books/{book_id}    - Get one book
pub fn build_router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/{author_id}",
            get(get_author).post(block_author).delete(delete_author),
        )
        .route(
            "/authors/{author_id}/books",
            get(list_books_for_author).post(create_book_for_author),
        )
        .route(
            "/authors/{author_id}/books/{book_id}",
            get(get_book_for_author),
        )
        .with_state(state);

    Router::new()
        .nest(base_path, api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
