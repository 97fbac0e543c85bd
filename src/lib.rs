//! # Biblio-RS
//!
//! An HTTP API for bibliographic resources (authors, books) built around a
//! dynamic resource-shaping core.
//!
//! ## Features
//!
//! - **Field Projection**: `?fields=id,name` returns exactly those
//!   properties, resolved case-insensitively against each DTO's declared
//!   field table
//! - **Mapped Sorting**: `?orderBy=name desc,age` translates public field
//!   names into one or more storage fields (with optional direction
//!   reversal) before the repository pages the data
//! - **Hypermedia Envelopes**: the `Accept` header selects between a plain
//!   paginated array and a linked (HATEOAS) collection with per-resource
//!   relation links
//! - **Media-Type Dispatch**: one route can carry several handler variants,
//!   chosen from a validated dispatch table of claimed media types
//! - **Typed Errors**: every failure maps to a stable `{code, message,
//!   details}` body and status code
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biblio::prelude::*;
//!
//! let repository = Arc::new(InMemoryLibraryRepository::new());
//! let config = ApiConfig::default();
//! let state = build_state(repository, &config)?;
//! let app = build_router(state, &config.base_path.0);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, AuthorsResourceParameters, FieldAccess, FieldValue, LinkBuilder,
        MediaTypeSelector, PagedResult, PaginationMeta, PropertyMap, PropertyMapRegistry,
        PropertyMappingValue, Representation, ResourceLink, ShapedRecord, SortClause, shape_many,
        shape_one,
    };

    // === Domain ===
    pub use crate::domain::{Author, AuthorDto, Book, BookDto};

    // === Storage ===
    pub use crate::storage::{InMemoryLibraryRepository, LibraryRepository};

    // === Config ===
    pub use crate::config::{ApiConfig, PaginationConfig};

    // === Server ===
    pub use crate::server::{AppState, build_router, build_state};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
