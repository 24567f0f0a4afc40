pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;

use async_trait::async_trait;
use axum::Router;
use stacks_kernel::{InitCtx, Migration, Module};

/// Books module: CRUD over books with the embedded author projection.
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        routes::router(ctx)
    }

    fn migrations(&self) -> Vec<Migration> {
        // The pool connects with foreign keys disabled, so the REFERENCES
        // clause is documentation only: deleting an author orphans its books
        // rather than failing the delete.
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    title            TEXT NOT NULL,
                    isbn             TEXT NOT NULL,
                    publication_date DATE NOT NULL,
                    author_id        INTEGER NOT NULL REFERENCES authors (id)
                )
                "#,
        }]
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
