pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;

use async_trait::async_trait;
use axum::Router;
use stacks_kernel::{InitCtx, Migration, Module};

/// Users module: signup and login, issuing access tokens.
pub struct UsersModule;

impl UsersModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        routes::router(ctx)
    }

    fn migrations(&self) -> Vec<Migration> {
        // The UNIQUE constraint is the final arbiter for concurrent signups
        // racing past the application-level existence check.
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS users (
                    id       INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT NOT NULL UNIQUE,
                    password TEXT NOT NULL
                )
                "#,
        }]
    }
}

/// Create a new instance of the users module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(UsersModule::new())
}
