//! Shared application state and startup wiring

use std::sync::Arc;

use crate::config::{ApiConfig, PaginationConfig};
use crate::core::error::ConfigError;
use crate::core::hypermedia::LinkBuilder;
use crate::core::media::{
    AUTHOR_FULL_MEDIA_TYPE, HATEOAS_MEDIA_TYPE, MediaTypeSelector, Representation,
};
use crate::core::sorting::{PropertyMap, PropertyMapRegistry, PropertyMappingValue};
use crate::domain::{Author, AuthorDto};
use crate::storage::LibraryRepository;

/// Payload variant for author creation, chosen from `Content-Type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateAuthorPayload {
    Standard,
    WithDateOfDeath,
}

/// Per-process state shared by every handler
///
/// Everything in here is constructed once in [`build_state`] and read-only
/// afterwards; concurrent requests share it without synchronization.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn LibraryRepository>,
    pub mappings: Arc<PropertyMapRegistry>,
    pub links: Arc<LinkBuilder>,
    pub representation: Arc<MediaTypeSelector<Representation>>,
    pub creation_payload: Arc<MediaTypeSelector<CreateAuthorPayload>>,
    pub pagination: PaginationConfig,
}

/// Wire up registry, selectors and link builder
///
/// Fails on ambiguous selector tables; there is no point starting a process
/// whose dispatch is undefined.
pub fn build_state(
    repository: Arc<dyn LibraryRepository>,
    config: &ApiConfig,
) -> Result<AppState, ConfigError> {
    let mut mappings = PropertyMapRegistry::new();
    mappings.register::<AuthorDto, Author>(author_property_map());

    let representation = MediaTypeSelector::builder("accept")
        .candidate(&[HATEOAS_MEDIA_TYPE], Representation::Hateoas)
        .default_candidate(Representation::Plain)
        .build()?;

    let creation_payload = MediaTypeSelector::builder("content-type")
        .candidate(&[AUTHOR_FULL_MEDIA_TYPE], CreateAuthorPayload::WithDateOfDeath)
        .default_candidate(CreateAuthorPayload::Standard)
        .build()?;

    Ok(AppState {
        repository,
        mappings: Arc::new(mappings),
        links: Arc::new(LinkBuilder::new(config.base_path.0.clone())),
        representation: Arc::new(representation),
        creation_payload: Arc::new(creation_payload),
        pagination: config.pagination.clone(),
    })
}

/// Public → storage sort-field mapping for authors
///
/// `age` sorts by birth date with the direction flipped (older means a
/// larger age but a smaller date); `name` is a composite over first and
/// last name and is registered reversed to match the behavior clients
/// already rely on.
fn author_property_map() -> PropertyMap {
    PropertyMap::new()
        .with("id", PropertyMappingValue::new(vec!["id"]))
        .with("genre", PropertyMappingValue::new(vec!["genre"]))
        .with("age", PropertyMappingValue::reversed(vec!["date_of_birth"]))
        .with(
            "name",
            PropertyMappingValue::reversed(vec!["first_name", "last_name"]),
        )
}
