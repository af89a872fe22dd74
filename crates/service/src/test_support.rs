#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the `users` table migrated.
///
/// Every call yields an isolated database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
