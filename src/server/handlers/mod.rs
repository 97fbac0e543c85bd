//! HTTP handlers

pub mod authors;
pub mod books;

pub use authors::{block_author, create_author, delete_author, get_author, list_authors};
pub use books::{create_book_for_author, get_book_for_author, list_books_for_author};
