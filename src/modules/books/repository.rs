//! SQLite persistence for books.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::FromRow;
use stacks_db::Db;

use super::models::{Book, BookData, BookDetail, BookListItem};
use crate::modules::authors::models::AuthorBrief;
use crate::pagination::PageWindow;

const DETAIL_QUERY: &str = "SELECT b.id, b.title, b.isbn, b.publication_date, \
     a.id AS author_id, a.first_name, a.last_name \
     FROM books b LEFT JOIN authors a ON a.id = b.author_id";

/// Joined row backing the full read shape. Author columns are null for
/// orphaned books.
#[derive(FromRow)]
struct BookDetailRow {
    id: i64,
    title: String,
    isbn: String,
    publication_date: NaiveDate,
    author_id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<BookDetailRow> for BookDetail {
    fn from(row: BookDetailRow) -> Self {
        let author = match (row.author_id, row.first_name, row.last_name) {
            (Some(id), Some(first_name), Some(last_name)) => Some(AuthorBrief {
                id,
                first_name,
                last_name,
            }),
            _ => None,
        };

        BookDetail {
            id: row.id,
            title: row.title,
            isbn: row.isbn,
            publication_date: row.publication_date,
            author,
        }
    }
}

#[derive(Clone)]
pub struct BookRepo {
    db: Db,
}

impl BookRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn insert(&self, data: &BookData) -> Result<Book> {
        let result = sqlx::query(
            "INSERT INTO books (title, isbn, publication_date, author_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.title)
        .bind(&data.isbn)
        .bind(data.publication_date)
        .bind(data.author_id)
        .execute(self.db.pool())
        .await?;

        Ok(Book {
            id: result.last_insert_rowid(),
            title: data.title.clone(),
            isbn: data.isbn.clone(),
            publication_date: data.publication_date,
            author_id: data.author_id,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, isbn, publication_date, author_id FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(book)
    }

    /// Full read shape with the embedded author projection.
    pub async fn detail(&self, id: i64) -> Result<Option<BookDetail>> {
        let row = sqlx::query_as::<_, BookDetailRow>(&format!("{DETAIL_QUERY} WHERE b.id = ?"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(BookDetail::from))
    }

    pub async fn list(&self, window: PageWindow) -> Result<Vec<BookDetail>> {
        let rows =
            sqlx::query_as::<_, BookDetailRow>(&format!("{DETAIL_QUERY} ORDER BY b.id LIMIT ? OFFSET ?"))
                .bind(window.limit)
                .bind(window.offset)
                .fetch_all(self.db.pool())
                .await?;

        Ok(rows.into_iter().map(BookDetail::from).collect())
    }

    /// Books belonging to one author, in the author-omitted list shape.
    pub async fn list_by_author(
        &self,
        author_id: i64,
        window: PageWindow,
    ) -> Result<Vec<BookListItem>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, isbn, publication_date, author_id \
             FROM books WHERE author_id = ? ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(author_id)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(self.db.pool())
        .await?;

        Ok(books.into_iter().map(BookListItem::from).collect())
    }

    pub async fn update(&self, book: &Book) -> Result<()> {
        sqlx::query(
            "UPDATE books SET title = ?, isbn = ?, publication_date = ?, author_id = ? \
             WHERE id = ?",
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.publication_date)
        .bind(book.author_id)
        .bind(book.id)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::models::AuthorData;
    use crate::modules::authors::repository::AuthorRepo;

    async fn repos() -> (AuthorRepo, BookRepo) {
        let db = Db::connect_ephemeral().await.unwrap();
        db.apply_migration(
            "authors",
            "001_init",
            r#"
            CREATE TABLE authors (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name  TEXT NOT NULL,
                birth_date DATE,
                biography  TEXT
            )
            "#,
        )
        .await
        .unwrap();
        db.apply_migration(
            "books",
            "001_init",
            r#"
            CREATE TABLE books (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                title            TEXT NOT NULL,
                isbn             TEXT NOT NULL,
                publication_date DATE NOT NULL,
                author_id        INTEGER NOT NULL REFERENCES authors (id)
            )
            "#,
        )
        .await
        .unwrap();

        (AuthorRepo::new(db.clone()), BookRepo::new(db))
    }

    async fn seed_author(authors: &AuthorRepo, n: u32) -> i64 {
        authors
            .insert(&AuthorData {
                first_name: format!("Author{n}"),
                last_name: format!("Surname{n}"),
                birth_date: None,
                biography: None,
            })
            .await
            .unwrap()
            .id
    }

    fn data(title: &str, author_id: i64) -> BookData {
        BookData {
            title: title.to_string(),
            isbn: "a1a1a1a1a1a".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2020, 3, 3).unwrap(),
            author_id,
        }
    }

    #[tokio::test]
    async fn detail_embeds_author_projection() {
        let (authors, books) = repos().await;
        let author_id = seed_author(&authors, 1).await;
        let book = books.insert(&data("Book 1", author_id)).await.unwrap();

        let detail = books.detail(book.id).await.unwrap().unwrap();
        assert_eq!(detail.title, "Book 1");
        let author = detail.author.unwrap();
        assert_eq!(author.id, author_id);
        assert_eq!(author.first_name, "Author1");
    }

    #[tokio::test]
    async fn detail_of_orphaned_book_has_null_author() {
        let (authors, books) = repos().await;
        let author_id = seed_author(&authors, 1).await;
        let book = books.insert(&data("Book 1", author_id)).await.unwrap();

        authors.delete(author_id).await.unwrap();

        let detail = books.detail(book.id).await.unwrap().unwrap();
        assert!(detail.author.is_none());
    }

    #[tokio::test]
    async fn list_by_author_filters_and_paginates() {
        let (authors, books) = repos().await;
        let first = seed_author(&authors, 1).await;
        let second = seed_author(&authors, 2).await;
        books.insert(&data("Book 1", first)).await.unwrap();
        books.insert(&data("Book 2", second)).await.unwrap();
        books.insert(&data("Book 3", first)).await.unwrap();

        let all = books
            .list_by_author(first, PageWindow::new(1, 10))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Book 1");
        assert_eq!(all[1].title, "Book 3");

        let page = books
            .list_by_author(first, PageWindow::new(2, 1))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Book 3");
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let (authors, books) = repos().await;
        let author_id = seed_author(&authors, 1).await;
        let mut book = books.insert(&data("Book 1", author_id)).await.unwrap();

        book.title = "Renamed".to_string();
        books.update(&book).await.unwrap();
        assert_eq!(books.get(book.id).await.unwrap().unwrap().title, "Renamed");

        assert!(books.delete(book.id).await.unwrap());
        assert!(books.get(book.id).await.unwrap().is_none());
    }
}
