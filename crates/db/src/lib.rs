//! SQLite connection pool and migration runner.

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Shared handle to the application database.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect to the database at `url`, creating it when it does not exist.
    ///
    /// Foreign keys stay unenforced: `REFERENCES` clauses in the schema are
    /// documentation, and deleting a referenced row orphans its dependents
    /// instead of failing the delete.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{url}'"))?
            .create_if_missing(true)
            .foreign_keys(false);

        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("failed to connect to database at '{url}'"))?;

        Ok(Self { pool })
    }

    /// Connect to a uniquely named in-memory database.
    ///
    /// Shared-cache mode keeps the database alive across the pool's
    /// connections; used by the test suites.
    pub async fn connect_ephemeral() -> Result<Self> {
        let name = uuid::Uuid::new_v4();
        let url = format!("sqlite:file:memdb_{name}?mode=memory&cache=shared");
        Self::connect(&url).await
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply a single module migration. DDL is expected to be idempotent.
    pub async fn apply_migration(&self, module: &str, id: &str, up: &str) -> Result<()> {
        sqlx::query(up)
            .execute(&self.pool)
            .await
            .with_context(|| format!("migration '{module}/{id}' failed"))?;

        tracing::debug!(module, migration = id, "migration applied");
        Ok(())
    }
}
