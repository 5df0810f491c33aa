//! Database connection establishment.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Connects to the database at `url`.
///
/// Idempotent from the caller's perspective: the returned handle is a pool
/// and may be cloned freely. Migrations and pool shutdown are the hosting
/// application's concern.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(options)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect: {e}")))?;

    info!("database connected");
    Ok(conn)
}
