//! Book HTTP handlers
//!
//! Books live under their author; every route first checks the author
//! exists.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::core::error::{ApiError, ResourceError, StorageError};
use crate::domain::mapper::book_to_dto;
use crate::domain::{Book, BookDto, BookForCreationDto};
use crate::server::state::AppState;

pub async fn list_books_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Vec<BookDto>>, ApiError> {
    if !state.repository.author_exists(&author_id).await? {
        return Err(ResourceError::AuthorNotFound { id: author_id }.into());
    }

    let books = state.repository.get_books_for_author(&author_id).await?;
    Ok(Json(books.iter().map(book_to_dto).collect()))
}

pub async fn get_book_for_author(
    State(state): State<AppState>,
    Path((author_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookDto>, ApiError> {
    if !state.repository.author_exists(&author_id).await? {
        return Err(ResourceError::AuthorNotFound { id: author_id }.into());
    }

    let book = state
        .repository
        .get_book_for_author(&author_id, &book_id)
        .await?
        .ok_or(ResourceError::BookNotFound { author_id, book_id })?;

    Ok(Json(book_to_dto(&book)))
}

pub async fn create_book_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Json(payload): Json<BookForCreationDto>,
) -> Result<Response, ApiError> {
    if !state.repository.author_exists(&author_id).await? {
        return Err(ResourceError::AuthorNotFound { id: author_id }.into());
    }

    let book = Book::new(author_id, payload.title, payload.description);
    let dto = book_to_dto(&book);
    state.repository.add_book_for_author(book).await?;

    if !state.repository.save().await? {
        tracing::error!(author_id = %author_id, "persisting new book failed");
        return Err(StorageError::SaveFailed.into());
    }

    tracing::info!(author_id = %author_id, book_id = %dto.id, "book created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, state.links.book_uri(author_id, dto.id))],
        Json(dto),
    )
        .into_response())
}
