//! Core resource-shaping and mapping subsystem
//!
//! Everything in here is transport-light and per-request: field projection,
//! sort-key translation, hypermedia link building, media-type dispatch, and
//! the pagination value types they share.

pub mod error;
pub mod field;
pub mod hypermedia;
pub mod media;
pub mod query;
pub mod shaping;
pub mod sorting;

pub use error::{
    ApiError, ApiResult, ConfigError, RequestError, ResourceError, ShapingError, SortError,
    StorageError,
};
pub use field::{FieldAccess, FieldValue};
pub use hypermedia::{LinkBuilder, PageShift, ResourceLink};
pub use media::{MediaTypeSelector, Representation};
pub use query::{AuthorsResourceParameters, PagedResult, PaginationMeta};
pub use shaping::{ShapedRecord, resolve_fields, shape_many, shape_one, type_has_fields};
pub use sorting::{PropertyMap, PropertyMapRegistry, PropertyMappingValue, SortClause};
