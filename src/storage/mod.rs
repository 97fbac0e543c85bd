//! Storage seams and implementations

pub mod in_memory;

pub use in_memory::InMemoryLibraryRepository;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::core::query::{AuthorsResourceParameters, PagedResult};
use crate::core::sorting::SortClause;
use crate::domain::{Author, Book};

/// Repository contract the request pipeline talks to
///
/// The pipeline treats this as an opaque collaborator: `get_authors` must
/// apply the supplied sort clauses *before* computing the page window, and
/// `save` reports persistence failure as `false` rather than an error —
/// callers escalate that as a fatal fault.
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    async fn author_exists(&self, id: &Uuid) -> Result<bool>;

    async fn get_author(&self, id: &Uuid) -> Result<Option<Author>>;

    /// Fetch one page of authors: filter, sort by the given clauses, then
    /// cut the page window
    async fn get_authors(
        &self,
        params: &AuthorsResourceParameters,
        sort: &[SortClause],
    ) -> Result<PagedResult<Author>>;

    /// Register an author and any books created together with it
    async fn add_author(&self, author: Author, books: Vec<Book>) -> Result<()>;

    /// Remove an author and every book they own
    async fn delete_author(&self, id: &Uuid) -> Result<()>;

    async fn get_books_for_author(&self, author_id: &Uuid) -> Result<Vec<Book>>;

    async fn get_book_for_author(&self, author_id: &Uuid, book_id: &Uuid)
    -> Result<Option<Book>>;

    async fn add_book_for_author(&self, book: Book) -> Result<()>;

    /// Flush pending changes; `false` signals a persistence failure
    async fn save(&self) -> Result<bool>;
}
