//! HTTP server facade for STACKS with Axum and shared error handling.

use anyhow::Context;
use axum::{routing::get, Router};

use stacks_kernel::{InitCtx, ModuleRegistry};

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
pub async fn start_server(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
    let server = &ctx.settings.server;

    let app = build_router(registry, ctx);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", server.host, server.port))
        .await
        .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        server.host,
        server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted under `/api`.
///
/// Also used directly by the integration tests, which drive the router
/// without binding a listener.
pub fn build_router(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> Router {
    let mut api = Router::new();
    for module in registry.modules() {
        tracing::info!(module = module.name(), "mounting module routes under /api");
        api = api.merge(module.routes(ctx));
    }

    RouterBuilder::new()
        .route("/healthz", get(health_check))
        .mount_api(api)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(ctx.settings.server.request_timeout_ms)
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
