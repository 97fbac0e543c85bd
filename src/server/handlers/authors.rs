//! Author HTTP handlers
//!
//! Collection reads walk the full assembly pipeline: validate the sort and
//! projection parameters, fetch a sorted page from the repository, map to
//! DTOs, shape, then branch on the negotiated representation.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::core::error::{ApiError, RequestError, ResourceError, StorageError};
use crate::core::hypermedia::PageShift;
use crate::core::media::Representation;
use crate::core::query::{AuthorsResourceParameters, PAGINATION_HEADER, PaginationMeta};
use crate::core::shaping::{resolve_fields, shape_many, shape_one};
use crate::core::sorting::translate;
use crate::domain::mapper::{
    author_for_creation_to_entity, author_to_dto, author_with_date_of_death_to_entity,
};
use crate::domain::{Author, AuthorDto, AuthorForCreationDto, AuthorWithDateOfDeathForCreationDto};
use crate::server::state::{AppState, CreateAuthorPayload};

/// Query parameters accepted on single-item reads
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub fields: Option<String>,
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<ItemQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let fields = query.fields.as_deref();

    // Reject unknown fields before touching the repository.
    resolve_fields::<AuthorDto>(fields)?;

    let representation = state
        .representation
        .resolve(&headers)
        .ok_or_else(|| not_acceptable(&headers))?;

    let author = state
        .repository
        .get_author(&author_id)
        .await?
        .ok_or(ResourceError::AuthorNotFound { id: author_id })?;

    let dto = author_to_dto(&author);
    let mut record = shape_one(&dto, fields)?;

    if representation == Representation::Hateoas {
        record.add_links(state.links.author_links(dto.id, fields));
    }

    Ok(Json(record).into_response())
}

pub async fn list_authors(
    State(state): State<AppState>,
    Query(params): Query<AuthorsResourceParameters>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let params = params.clamped(&state.pagination);

    // Validation fails closed: nothing is fetched on an unmapped sort field
    // or an unknown projection field.
    let map = state.mappings.get::<AuthorDto, Author>()?;
    let clauses = translate(params.order_by.as_deref().unwrap_or(""), map)?;
    resolve_fields::<AuthorDto>(params.fields.as_deref())?;

    let representation = state
        .representation
        .resolve(&headers)
        .ok_or_else(|| not_acceptable(&headers))?;

    let paged = state.repository.get_authors(&params, &clauses).await?;
    let paged = paged.map(|author| author_to_dto(&author));
    let mut records = shape_many(&paged.items, params.fields.as_deref())?;

    match representation {
        Representation::Hateoas => {
            for (dto, record) in paged.items.iter().zip(records.iter_mut()) {
                record.add_links(state.links.author_links(dto.id, params.fields.as_deref()));
            }
            let collection_links =
                state
                    .links
                    .collection_links(&params, paged.has_next(), paged.has_previous());

            // The header carries counts only; page links live in the body.
            let meta = PaginationMeta::counts_only(&paged);
            let body = json!({ "value": records, "links": collection_links });

            Ok((
                [(PAGINATION_HEADER, meta.to_header_value())],
                Json(body),
            )
                .into_response())
        }
        Representation::Plain => {
            let previous = paged
                .has_previous()
                .then(|| state.links.authors_page_uri(&params, PageShift::Previous));
            let next = paged
                .has_next()
                .then(|| state.links.authors_page_uri(&params, PageShift::Next));
            let meta = PaginationMeta::with_links(&paged, previous, next);

            Ok((
                [(PAGINATION_HEADER, meta.to_header_value())],
                Json(records),
            )
                .into_response())
        }
    }
}

pub async fn create_author(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let kind = state
        .creation_payload
        .resolve(&headers)
        .ok_or_else(|| unsupported_media_type(&headers))?;

    let (author, books) = match kind {
        CreateAuthorPayload::Standard => {
            let dto: AuthorForCreationDto = serde_json::from_value(payload)?;
            author_for_creation_to_entity(dto)
        }
        CreateAuthorPayload::WithDateOfDeath => {
            let dto: AuthorWithDateOfDeathForCreationDto = serde_json::from_value(payload)?;
            author_with_date_of_death_to_entity(dto)
        }
    };

    let id = author.id;
    let dto = author_to_dto(&author);
    state.repository.add_author(author, books).await?;

    if !state.repository.save().await? {
        tracing::error!(author_id = %id, "persisting new author failed");
        return Err(StorageError::SaveFailed.into());
    }

    tracing::info!(author_id = %id, "author created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, state.links.author_uri(id))],
        Json(dto),
    )
        .into_response())
}

/// Creation guard on an item URI
///
/// POSTing to an existing author's URI is a conflict, not an upsert; for an
/// unknown id the resource simply is not there.
pub async fn block_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    if state.repository.author_exists(&author_id).await? {
        return Err(ResourceError::AuthorAlreadyExists { id: author_id }.into());
    }
    Err(ResourceError::AuthorNotFound { id: author_id }.into())
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let author = state
        .repository
        .get_author(&author_id)
        .await?
        .ok_or(ResourceError::AuthorNotFound { id: author_id })?;

    state.repository.delete_author(&author.id).await?;

    if !state.repository.save().await? {
        tracing::error!(author_id = %author_id, "persisting author deletion failed");
        return Err(StorageError::SaveFailed.into());
    }

    tracing::info!(author_id = %author_id, "author deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

fn not_acceptable(headers: &HeaderMap) -> ApiError {
    RequestError::NotAcceptable {
        value: header_value(headers, header::ACCEPT.as_str()),
    }
    .into()
}

fn unsupported_media_type(headers: &HeaderMap) -> ApiError {
    RequestError::UnsupportedMediaType {
        value: header_value(headers, header::CONTENT_TYPE.as_str()),
    }
    .into()
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
