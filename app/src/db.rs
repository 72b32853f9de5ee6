use crate::error::{BookingError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

pub async fn init_database(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url)
        .await
        .map_err(|e| BookingError::Config(format!("Failed to connect to database: {e}")))
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection> {
    let db = init_database(database_url).await?;
    info!("Running migrations...");
    Migrator::up(&db, None).await?;
    Ok(db)
}
