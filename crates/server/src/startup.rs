use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::users::SqlUserStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Config file when present, otherwise environment variables.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Connect storage, apply migrations when enabled, and wire the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    }
    let state = ServerState::from_store(SqlUserStore::new(db));
    Ok(routes::build_router(state, &cfg.server))
}

/// Serve until Ctrl+C, letting in-flight requests finish.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, draining connections");
    }
}

/// Build the app from an already loaded config and run the HTTP server.
///
/// Environment, logging and config loading belong to the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, validate_headers = cfg.server.validate_headers, "starting user service");
    serve(listener, app).await
}
