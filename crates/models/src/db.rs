use std::str::FromStr;
use std::time::Duration;

use sea_orm::sqlx::sqlite::SqliteConnectOptions;
use sea_orm::sqlx::{ConnectOptions as _, Sqlite};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, SqlxSqliteConnector};
use tracing::info;

pub use configs::DatabaseConfig;

/// Pool options derived from config.
///
/// In-memory SQLite lives inside a single connection, so the pool is pinned to
/// exactly one connection and carries no idle or lifetime limit.
pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if is_sqlite_memory(&cfg.url) {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    opt
}

fn is_sqlite_memory(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.starts_with("sqlite:") && lower.contains(":memory:")
}

/// sqlx applies its own idle and lifetime defaults when none are given, and a
/// retired in-memory connection takes its database with it. Both are disabled here.
async fn connect_sqlite_memory(opt: ConnectOptions) -> anyhow::Result<DatabaseConnection> {
    let mut sqlite = SqliteConnectOptions::from_str(opt.get_url())?;
    if !opt.get_sqlx_logging() {
        sqlite = sqlite.disable_statement_logging();
    }
    let pool = opt
        .sqlx_pool_options::<Sqlite>()
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(sqlite)
        .await?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let opt = connect_options(cfg);
    let db = if is_sqlite_memory(&cfg.url) {
        connect_sqlite_memory(opt).await?
    } else {
        Database::connect(opt).await?
    };
    info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        "database pool ready"
    );
    Ok(db)
}
