#![allow(dead_code)]

use std::time::Duration;

use axocom_api::auth::Authenticator;
use axocom_api::config::{AuthConfig, DatabaseConfig};
use axocom_api::db;
use sqlx::mysql::MySqlPool;

/// A pool pointed at a port nothing listens on. Every acquire fails after a short timeout.
pub fn unreachable_pool() -> MySqlPool {
    db::connect_lazy(&DatabaseConfig {
        host: "127.0.0.1".to_owned(),
        port: 1,
        user: "root".to_owned(),
        password: String::new(),
        name: "axocom".to_owned(),
        max_connections: 2,
        acquire_timeout: Duration::from_millis(300),
    })
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "access-secret".to_owned(),
        jwt_refresh_secret: "refresh-secret".to_owned(),
        access_ttl_secs: 3600,
        refresh_ttl_secs: 7 * 24 * 3600,
        bcrypt_cost: 4,
    }
}

pub fn authenticator() -> Authenticator {
    Authenticator::new(&auth_config())
}
