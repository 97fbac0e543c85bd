//! Entity ↔ DTO mapping

use chrono::{Datelike, NaiveDate, Utc};

use super::author::Author;
use super::book::Book;
use super::dto::{
    AuthorDto, AuthorForCreationDto, AuthorWithDateOfDeathForCreationDto, BookDto,
    BookForCreationDto,
};

/// Map an author entity to its public representation
pub fn author_to_dto(author: &Author) -> AuthorDto {
    AuthorDto {
        id: author.id,
        name: format!("{} {}", author.first_name, author.last_name),
        age: age_of(author),
        genre: author.genre.clone(),
    }
}

/// Age in whole years, frozen at the date of death for deceased authors
fn age_of(author: &Author) -> i32 {
    let reference = author
        .date_of_death
        .unwrap_or_else(|| Utc::now().date_naive());
    age_at(author.date_of_birth, reference)
}

fn age_at(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

pub fn book_to_dto(book: &Book) -> BookDto {
    BookDto {
        id: book.id,
        author_id: book.author_id,
        title: book.title.clone(),
        description: book.description.clone(),
    }
}

/// Build the entity (and its books) from the standard creation payload
pub fn author_for_creation_to_entity(dto: AuthorForCreationDto) -> (Author, Vec<Book>) {
    let author = Author::new(dto.first_name, dto.last_name, dto.date_of_birth, dto.genre);
    let books = books_for(author.id, dto.books);
    (author, books)
}

/// Build the entity from the richer payload carrying a date of death
pub fn author_with_date_of_death_to_entity(
    dto: AuthorWithDateOfDeathForCreationDto,
) -> (Author, Vec<Book>) {
    let author = Author::new(dto.first_name, dto.last_name, dto.date_of_birth, dto.genre)
        .with_date_of_death(dto.date_of_death);
    let books = books_for(author.id, dto.books);
    (author, books)
}

fn books_for(author_id: uuid::Uuid, dtos: Vec<BookForCreationDto>) -> Vec<Book> {
    dtos.into_iter()
        .map(|book| Book::new(author_id, book.title, book.description))
        .collect()
}
