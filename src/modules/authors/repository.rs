//! SQLite persistence for authors.

use anyhow::Result;
use stacks_db::Db;

use super::models::{Author, AuthorData};
use crate::pagination::PageWindow;

#[derive(Clone)]
pub struct AuthorRepo {
    db: Db,
}

impl AuthorRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn insert(&self, data: &AuthorData) -> Result<Author> {
        let result = sqlx::query(
            "INSERT INTO authors (first_name, last_name, birth_date, biography) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.birth_date)
        .bind(&data.biography)
        .execute(self.db.pool())
        .await?;

        Ok(Author {
            id: result.last_insert_rowid(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            birth_date: data.birth_date,
            biography: data.biography.clone(),
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, birth_date, biography \
             FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(author)
    }

    /// Read-only existence check, used by book validation.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    pub async fn list(&self, window: PageWindow) -> Result<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, birth_date, biography \
             FROM authors ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(self.db.pool())
        .await?;

        Ok(authors)
    }

    pub async fn update(&self, author: &Author) -> Result<()> {
        sqlx::query(
            "UPDATE authors SET first_name = ?, last_name = ?, birth_date = ?, biography = ? \
             WHERE id = ?",
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.birth_date)
        .bind(&author.biography)
        .bind(author.id)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Hard delete. Referencing books are left untouched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
