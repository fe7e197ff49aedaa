//! Connection bootstrap: build the pool for a profile and bring the schema up.

use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays.
/// Returns the last error once attempts are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(profile: DbProfile, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    match profile {
        // Every SQLite memory connection is its own database; pin the pool to one.
        DbProfile::InMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbProfile::Prod | DbProfile::Test => {
            opts.max_connections(16).min_connections(1);
        }
    }
    opts
}

/// Connect for `profile` without touching the schema.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;
    let attempts = if profile == DbProfile::InMemory {
        1
    } else {
        CONNECT_ATTEMPTS
    };
    retry_connection(
        || {
            let opts = connect_options(profile, url.clone());
            async move { Database::connect(opts).await.map_err(AppError::from) }
        },
        attempts,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await
}

/// Single entrypoint used by the app and tests: connect, then migrate up.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(?profile, "database ready");
    Ok(conn)
}
