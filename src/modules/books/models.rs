use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::modules::authors::models::AuthorBrief;

/// Persisted book row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub publication_date: NaiveDate,
    pub author_id: i64,
}

/// Full read shape: the author reference is replaced by a reduced author
/// projection, or null when the referenced author no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDetail {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub publication_date: NaiveDate,
    pub author: Option<AuthorBrief>,
}

/// List-context shape for books of a given author: the owning author is
/// implied by the request path and omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookListItem {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub publication_date: NaiveDate,
}

impl From<Book> for BookListItem {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            isbn: book.isbn,
            publication_date: book.publication_date,
        }
    }
}

/// Normalized book payload produced by validation. All fields are required
/// by the write schema, so applying it overwrites the whole row.
#[derive(Debug, Clone, PartialEq)]
pub struct BookData {
    pub title: String,
    pub isbn: String,
    pub publication_date: NaiveDate,
    pub author_id: i64,
}

impl BookData {
    pub fn apply_to(self, book: &mut Book) {
        book.title = self.title;
        book.isbn = self.isbn;
        book.publication_date = self.publication_date;
        book.author_id = self.author_id;
    }
}
