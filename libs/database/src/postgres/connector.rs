use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{retry_with_backoff, RetryConfig};

/// Connect using a [`PostgresConfig`].
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("connected to PostgreSQL");
    Ok(db)
}

/// Connect with retry and exponential backoff.
///
/// Used at startup where the database may still be coming up.
pub async fn connect_with_retry(
    config: PostgresConfig,
    retry: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let retry = retry.unwrap_or_default();
    retry_with_backoff(|| connect_from_config(config.clone()), retry).await
}

/// Apply all pending migrations.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("running migrations for {app_name}");
    M::up(db, None).await?;
    info!("migrations for {app_name} are up to date");
    Ok(())
}

/// Round-trip check used by the readiness endpoint.
pub async fn ping(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}
