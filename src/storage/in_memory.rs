//! In-memory implementation of LibraryRepository for testing and development

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::LibraryRepository;
use crate::core::query::{AuthorsResourceParameters, PagedResult};
use crate::core::sorting::{SortClause, apply_sort};
use crate::domain::{Author, Book};

/// In-memory library repository
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryLibraryRepository {
    authors: Arc<RwLock<HashMap<Uuid, Author>>>,
    books: Arc<RwLock<HashMap<Uuid, Book>>>,
}

impl InMemoryLibraryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload authors and books, typically at process start
    pub fn seed(&self, authors: Vec<Author>, books: Vec<Book>) -> Result<()> {
        let mut author_map = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let mut book_map = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        for author in authors {
            author_map.insert(author.id, author);
        }
        for book in books {
            book_map.insert(book.id, book);
        }

        Ok(())
    }

    fn matches(author: &Author, params: &AuthorsResourceParameters) -> bool {
        if let Some(genre) = params.genre.as_deref().map(str::trim).filter(|g| !g.is_empty())
            && !author.genre.eq_ignore_ascii_case(genre)
        {
            return false;
        }

        if let Some(search) = params
            .search_query
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = search.to_lowercase();
            let haystacks = [
                author.first_name.to_lowercase(),
                author.last_name.to_lowercase(),
                author.genre.to_lowercase(),
            ];
            if !haystacks.iter().any(|h| h.contains(&needle)) {
                return false;
            }
        }

        true
    }
}

#[async_trait]
impl LibraryRepository for InMemoryLibraryRepository {
    async fn author_exists(&self, id: &Uuid) -> Result<bool> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.contains_key(id))
    }

    async fn get_author(&self, id: &Uuid) -> Result<Option<Author>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(authors.get(id).cloned())
    }

    async fn get_authors(
        &self,
        params: &AuthorsResourceParameters,
        sort: &[SortClause],
    ) -> Result<PagedResult<Author>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let filtered: Vec<Author> = authors
            .values()
            .filter(|author| Self::matches(author, params))
            .cloned()
            .collect();

        // Ordering must be settled before the page window is cut.
        let sorted = apply_sort(&filtered, sort);

        let page = params.page();
        let size = params.size();
        let total_count = sorted.len();
        let items: Vec<Author> = sorted
            .into_iter()
            .skip((page - 1) * size)
            .take(size)
            .collect();

        Ok(PagedResult::new(items, total_count, page, size))
    }

    async fn add_author(&self, author: Author, books: Vec<Book>) -> Result<()> {
        let mut author_map = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let mut book_map = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        author_map.insert(author.id, author);
        for book in books {
            book_map.insert(book.id, book);
        }

        Ok(())
    }

    async fn delete_author(&self, id: &Uuid) -> Result<()> {
        let mut author_map = self
            .authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let mut book_map = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        author_map.remove(id);
        book_map.retain(|_, book| &book.author_id != id);

        Ok(())
    }

    async fn get_books_for_author(&self, author_id: &Uuid) -> Result<Vec<Book>> {
        let books = self
            .books
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut owned: Vec<Book> = books
            .values()
            .filter(|book| &book.author_id == author_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(owned)
    }

    async fn get_book_for_author(
        &self,
        author_id: &Uuid,
        book_id: &Uuid,
    ) -> Result<Option<Book>> {
        let books = self
            .books
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(books
            .get(book_id)
            .filter(|book| &book.author_id == author_id)
            .cloned())
    }

    async fn add_book_for_author(&self, book: Book) -> Result<()> {
        let mut books = self
            .books
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        books.insert(book.id, book);

        Ok(())
    }

    async fn save(&self) -> Result<bool> {
        // Mutations above are applied directly; there is nothing to flush.
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn seeded() -> InMemoryLibraryRepository {
        let repo = InMemoryLibraryRepository::new();
        repo.seed(
            vec![
                Author::new("Stephen", "King", date(1947, 9, 21), "Horror"),
                Author::new("Mary", "Shelley", date(1797, 8, 30), "Gothic"),
                Author::new("Shirley", "Jackson", date(1916, 12, 14), "Horror"),
            ],
            vec![],
        )
        .expect("seed should succeed");
        repo
    }

    fn by_last_name() -> Vec<SortClause> {
        vec![SortClause {
            field: "last_name",
            descending: false,
        }]
    }

    #[tokio::test]
    async fn test_exists_and_get() {
        let repo = InMemoryLibraryRepository::new();
        let author = Author::new("Octavia", "Butler", date(1947, 6, 22), "Science Fiction");
        let id = author.id;

        repo.add_author(author, vec![]).await.unwrap();

        assert!(repo.author_exists(&id).await.unwrap());
        assert_eq!(
            repo.get_author(&id).await.unwrap().unwrap().last_name,
            "Butler"
        );
        assert!(!repo.author_exists(&Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_authors_sorts_before_paging() {
        let repo = seeded();
        let params = AuthorsResourceParameters {
            page_number: Some(1),
            page_size: Some(2),
            ..Default::default()
        };

        let page = repo.get_authors(&params, &by_last_name()).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].last_name, "Jackson");
        assert_eq!(page.items[1].last_name, "King");
        assert!(page.has_next());

        let params = AuthorsResourceParameters {
            page_number: Some(2),
            page_size: Some(2),
            ..Default::default()
        };
        let page = repo.get_authors(&params, &by_last_name()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].last_name, "Shelley");
        assert!(page.has_previous());
    }

    #[tokio::test]
    async fn test_get_authors_genre_filter() {
        let repo = seeded();
        let params = AuthorsResourceParameters {
            genre: Some("horror".to_string()),
            ..Default::default()
        };

        let page = repo.get_authors(&params, &by_last_name()).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert!(page.items.iter().all(|a| a.genre == "Horror"));
    }

    #[tokio::test]
    async fn test_get_authors_search_query() {
        let repo = seeded();
        let params = AuthorsResourceParameters {
            search_query: Some("shel".to_string()),
            ..Default::default()
        };

        let page = repo.get_authors(&params, &[]).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].last_name, "Shelley");
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let repo = seeded();
        let params = AuthorsResourceParameters {
            page_number: Some(5),
            page_size: Some(10),
            ..Default::default()
        };

        let page = repo.get_authors(&params, &[]).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn test_delete_author_cascades_to_books() {
        let repo = InMemoryLibraryRepository::new();
        let author = Author::new("Stephen", "King", date(1947, 9, 21), "Horror");
        let id = author.id;
        let books = vec![
            Book::new(id, "It", None),
            Book::new(id, "The Shining", None),
        ];

        repo.add_author(author, books).await.unwrap();
        assert_eq!(repo.get_books_for_author(&id).await.unwrap().len(), 2);

        repo.delete_author(&id).await.unwrap();
        assert!(!repo.author_exists(&id).await.unwrap());
        assert!(repo.get_books_for_author(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_books_are_scoped_to_their_author() {
        let repo = seeded();
        let author = Author::new("Ursula", "Le Guin", date(1929, 10, 21), "Science Fiction");
        let author_id = author.id;
        repo.add_author(author, vec![]).await.unwrap();

        let book = Book::new(author_id, "The Left Hand of Darkness", None);
        let book_id = book.id;
        repo.add_book_for_author(book).await.unwrap();

        assert!(
            repo.get_book_for_author(&author_id, &book_id)
                .await
                .unwrap()
                .is_some()
        );
        // Same book id under a different author resolves to nothing.
        assert!(
            repo.get_book_for_author(&Uuid::new_v4(), &book_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_books_listing_is_title_ordered() {
        let repo = InMemoryLibraryRepository::new();
        let author = Author::new("Stephen", "King", date(1947, 9, 21), "Horror");
        let id = author.id;
        repo.add_author(author, vec![]).await.unwrap();
        repo.add_book_for_author(Book::new(id, "The Shining", None))
            .await
            .unwrap();
        repo.add_book_for_author(Book::new(id, "Carrie", None))
            .await
            .unwrap();

        let books = repo.get_books_for_author(&id).await.unwrap();
        assert_eq!(books[0].title, "Carrie");
        assert_eq!(books[1].title, "The Shining");
    }

    #[tokio::test]
    async fn test_save_reports_success() {
        let repo = InMemoryLibraryRepository::new();
        assert!(repo.save().await.unwrap());
    }
}
