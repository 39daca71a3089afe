use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use domain::auth::{ApiKeyAuth, StaticCredentialStore};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::ServerState;
use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, apply the schema, optionally seed, and load API keys.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    common::env::ensure_database_dir(&cfg.database.url).await?;
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db)
        .await
        .map_err(|e| StartupError::Database(format!("ping: {e}")))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrations: {e}")))?;

    if cfg.seed.demo_data {
        domain::seed::populate_initial_data(&db).await?;
    }

    let store = StaticCredentialStore::from_config(&cfg.auth)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(keys = store.len(), "credential store loaded");
    Ok(ServerState { db, auth: ApiKeyAuth::new(Arc::new(store)) })
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .map_err(|e| {
            StartupError::InvalidConfig(format!(
                "cannot bind {}:{}: {e}",
                cfg.server.host, cfg.server.port
            ))
        })?;
    info!(addr = %listener.local_addr()?, "http server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("http server stopped");
    Ok(())
}
