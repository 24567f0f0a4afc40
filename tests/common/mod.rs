//! Shared harness: a fully wired router over an ephemeral database.

#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use stacks_app::modules;
use stacks_auth::TokenService;
use stacks_db::Db;
use stacks_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub struct TestApp {
    pub router: Router,
    pub db: Db,
    pub tokens: TokenService,
}

pub async fn spawn_app() -> TestApp {
    let settings = Settings::default();
    let db = Db::connect_ephemeral().await.expect("ephemeral database");
    let tokens = TokenService::new("test-secret", Duration::from_secs(300));

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    for (module, migration) in registry.collect_migrations() {
        db.apply_migration(&module, migration.id, migration.up)
            .await
            .expect("migration");
    }

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
        tokens: &tokens,
    };
    let router = stacks_http::build_router(&registry, &ctx);

    TestApp { router, db, tokens }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        (status, value)
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", path, None, Some(body)).await
    }
}
