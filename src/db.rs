//! The process-wide MySQL pool.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;

use crate::config::DatabaseConfig;

fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Duration::from_secs(60))
}

/// Opens the pool and pings one connection so that a misconfigured store fails at startup.
pub async fn connect(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = pool_options(config).connect_with(connect_options(config)).await?;
    let mut conn = pool.acquire().await?;
    conn.ping().await?;
    drop(conn);

    tracing::info!(host = %config.host, database = %config.name, "MySQL pool connected");
    Ok(pool)
}

/// Builds the pool without opening any connection. Must be called inside a tokio runtime.
pub fn connect_lazy(config: &DatabaseConfig) -> MySqlPool {
    pool_options(config).connect_lazy_with(connect_options(config))
}

pub async fn migrate(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}
