//! SQLite persistence for users.

use anyhow::Result;
use stacks_db::Db;

use super::models::User;

#[derive(Clone)]
pub struct UserRepo {
    db: Db,
}

impl UserRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a user with an already-hashed password.
    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(self.db.pool())
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password: password_hash.to_string(),
        })
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }
}
