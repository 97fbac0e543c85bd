//! Book entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book, always owned by exactly one author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl Book {
    pub fn new(author_id: Uuid, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: title.into(),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_binds_author() {
        let author_id = Uuid::new_v4();
        let book = Book::new(author_id, "The Shining", None);
        assert_eq!(book.author_id, author_id);
        assert_eq!(book.title, "The Shining");
        assert!(book.description.is_none());
    }
}
