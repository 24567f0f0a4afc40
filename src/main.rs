use std::time::Duration;

use anyhow::Context;

use stacks_app::modules;
use stacks_auth::TokenService;
use stacks_db::Db;
use stacks_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load STACKS settings")?;
    stacks_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "stacks-app bootstrap starting"
    );

    let db = Db::connect(&settings.database.url).await?;
    let tokens = TokenService::new(
        &settings.auth.secret,
        Duration::from_secs(settings.auth.token_ttl_minutes * 60),
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    for (module, migration) in registry.collect_migrations() {
        db.apply_migration(&module, migration.id, migration.up)
            .await?;
    }

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
        tokens: &tokens,
    };
    registry.init_all(&ctx).await?;

    tracing::info!("stacks-app bootstrap complete");
    stacks_http::start_server(&registry, &ctx).await
}
