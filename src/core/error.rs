//! Typed error handling for the biblio API
//!
//! A single [`ApiError`] wraps category enums so callers can match on the
//! failure class instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`ShapingError`]: requested projection fields that do not resolve
//! - [`SortError`]: order-by expressions referencing unmapped fields
//! - [`ResourceError`]: missing or conflicting resources
//! - [`RequestError`]: malformed bodies and media-type negotiation failures
//! - [`StorageError`]: repository faults
//! - [`ConfigError`]: startup wiring problems (never request-recoverable)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the biblio API
#[derive(Debug)]
pub enum ApiError {
    /// Field-projection errors
    Shaping(ShapingError),

    /// Sort-translation errors
    Sort(SortError),

    /// Resource lookup/conflict errors
    Resource(ResourceError),

    /// HTTP request errors (body, media types)
    Request(RequestError),

    /// Repository faults
    Storage(StorageError),

    /// Startup configuration errors
    Config(ConfigError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Shaping(e) => write!(f, "{}", e),
            ApiError::Sort(e) => write!(f, "{}", e),
            ApiError::Resource(e) => write!(f, "{}", e),
            ApiError::Request(e) => write!(f, "{}", e),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Shaping(e) => Some(e),
            ApiError::Sort(e) => Some(e),
            ApiError::Resource(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Storage(e) => Some(e),
            ApiError::Config(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Shaping(_) => StatusCode::BAD_REQUEST,
            ApiError::Sort(_) => StatusCode::BAD_REQUEST,
            ApiError::Resource(e) => e.status_code(),
            ApiError::Request(e) => e.status_code(),
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Shaping(_) => "FIELD_NOT_FOUND",
            ApiError::Sort(_) => "ORDER_BY_NOT_MAPPED",
            ApiError::Resource(e) => e.error_code(),
            ApiError::Request(e) => e.error_code(),
            ApiError::Storage(e) => e.error_code(),
            ApiError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Shaping(ShapingError::UnknownField { field, type_name }) => {
                Some(serde_json::json!({
                    "field": field,
                    "type": type_name
                }))
            }
            ApiError::Sort(SortError::UnmappedField { field }) => {
                Some(serde_json::json!({ "field": field }))
            }
            ApiError::Resource(ResourceError::AuthorNotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            ApiError::Resource(ResourceError::BookNotFound { author_id, book_id }) => {
                Some(serde_json::json!({
                    "author_id": author_id.to_string(),
                    "book_id": book_id.to_string()
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Shaping Errors
// =============================================================================

/// Errors raised by the field-projection engine
#[derive(Debug, Clone, PartialEq)]
pub enum ShapingError {
    /// A requested projection field does not exist on the target shape
    UnknownField { field: String, type_name: String },
}

impl fmt::Display for ShapingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapingError::UnknownField { field, type_name } => {
                write!(f, "Field '{}' not found on {}", field, type_name)
            }
        }
    }
}

impl std::error::Error for ShapingError {}

impl From<ShapingError> for ApiError {
    fn from(err: ShapingError) -> Self {
        ApiError::Shaping(err)
    }
}

// =============================================================================
// Sort Errors
// =============================================================================

/// Errors raised by the sort translator
#[derive(Debug, Clone, PartialEq)]
pub enum SortError {
    /// An order-by clause references a field with no property mapping
    UnmappedField { field: String },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::UnmappedField { field } => {
                write!(f, "Key mapping for '{}' is missing", field)
            }
        }
    }
}

impl std::error::Error for SortError {}

impl From<SortError> for ApiError {
    fn from(err: SortError) -> Self {
        ApiError::Sort(err)
    }
}

// =============================================================================
// Resource Errors
// =============================================================================

/// Errors related to resource lookup
#[derive(Debug)]
pub enum ResourceError {
    /// Author was not found
    AuthorNotFound { id: Uuid },

    /// Book was not found under the given author
    BookNotFound { author_id: Uuid, book_id: Uuid },

    /// Creation targeted the URI of an existing author
    AuthorAlreadyExists { id: Uuid },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::AuthorNotFound { id } => {
                write!(f, "Author with id '{}' not found", id)
            }
            ResourceError::BookNotFound { author_id, book_id } => {
                write!(
                    f,
                    "Book '{}' not found for author '{}'",
                    book_id, author_id
                )
            }
            ResourceError::AuthorAlreadyExists { id } => {
                write!(f, "Author with id '{}' already exists", id)
            }
        }
    }
}

impl std::error::Error for ResourceError {}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResourceError::AuthorNotFound { .. } => StatusCode::NOT_FOUND,
            ResourceError::BookNotFound { .. } => StatusCode::NOT_FOUND,
            ResourceError::AuthorAlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ResourceError::AuthorNotFound { .. } => "AUTHOR_NOT_FOUND",
            ResourceError::BookNotFound { .. } => "BOOK_NOT_FOUND",
            ResourceError::AuthorAlreadyExists { .. } => "AUTHOR_ALREADY_EXISTS",
        }
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        ApiError::Resource(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid request body
    InvalidBody { message: String },

    /// Content-Type matched no registered payload handler
    UnsupportedMediaType { value: String },

    /// Accept matched no registered representation
    NotAcceptable { value: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::UnsupportedMediaType { value } => {
                write!(f, "Unsupported media type: '{}'", value)
            }
            RequestError::NotAcceptable { value } => {
                write!(f, "No representation available for '{}'", value)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            RequestError::NotAcceptable { .. } => "NOT_ACCEPTABLE",
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the repository collaborator
#[derive(Debug)]
pub enum StorageError {
    /// The repository reported a failed save; treated as fatal, no retry
    SaveFailed,

    /// Any other backend fault
    Backend { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::SaveFailed => write!(f, "Saving changes failed"),
            StorageError::Backend { message } => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::SaveFailed => "SAVE_FAILED",
            StorageError::Backend { .. } => "STORAGE_ERROR",
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to startup configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse a configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },

    /// No property map registered for a (source, destination) type pair
    MissingPropertyMap {
        source: &'static str,
        destination: &'static str,
    },

    /// Two media-type candidates claim the same header value
    AmbiguousMediaType { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConfigError::MissingPropertyMap {
                source,
                destination,
            } => {
                write!(
                    f,
                    "No property mapping registered for <{}, {}>",
                    source, destination
                )
            }
            ConfigError::AmbiguousMediaType { value } => {
                write!(
                    f,
                    "Media type '{}' is claimed by more than one candidate",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(StorageError::Backend {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================
