//! Process configuration, read from environment variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for environment variable {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub app_env: String,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    /// Debounce applied by every loader worker before it dispatches a window.
    pub loader_batch_delay: Duration,
    pub run_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_refresh_secret", &"<redacted>")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let jwt_secret = env.required("JWT_SECRET")?;
        let jwt_refresh_secret = env.get("JWT_REFRESH_SECRET").unwrap_or_else(|| jwt_secret.clone());

        Ok(Config {
            port: env.parse("PORT", 3000)?,
            cors_origin: env.string("CORS_ORIGIN", "http://localhost:5173"),
            app_env: env.string("APP_ENV", "development"),
            database: DatabaseConfig {
                host: env.string("DB_HOST", "localhost"),
                port: env.parse("DB_PORT", 3306)?,
                user: env.string("DB_USER", "root"),
                password: env.string("DB_PASSWORD", ""),
                name: env.string("DB_NAME", "axocom"),
                max_connections: env.parse("DB_MAX_CONNECTIONS", 50)?,
                acquire_timeout: Duration::from_secs(env.parse("DB_ACQUIRE_TIMEOUT_SECS", 30)?),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_refresh_secret,
                access_ttl_secs: env.parse("ACCESS_TOKEN_TTL_SECS", 24 * 60 * 60)?,
                refresh_ttl_secs: env.parse("REFRESH_TOKEN_TTL_SECS", 7 * 24 * 60 * 60)?,
                bcrypt_cost: env.parse("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            },
            loader_batch_delay: Duration::from_millis(env.parse("LOADER_BATCH_DELAY_MS", 1)?),
            run_migrations: env.parse("RUN_MIGRATIONS", false)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

struct Env<L>(L);

impl<L> Env<L>
where
    L: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_owned())
    }

    fn parse<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.auth.jwt_refresh_secret, "s3cret");
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert_eq!(config.loader_batch_delay, Duration::from_millis(1));
        assert!(!config.run_migrations);
        assert!(!config.is_production());
    }

    #[test]
    fn jwt_secret_is_required() {
        assert_eq!(config_from(&[]).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
        assert_eq!(
            config_from(&[("JWT_SECRET", "  ")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config_from(&[("JWT_SECRET", "x"), ("PORT", "eighty")]).unwrap_err();
        assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "eighty".to_owned() });
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("JWT_SECRET", "x"),
            ("JWT_REFRESH_SECRET", "y"),
            ("APP_ENV", "production"),
            ("LOADER_BATCH_DELAY_MS", "0"),
            ("RUN_MIGRATIONS", "true"),
        ])
        .unwrap();
        assert_eq!(config.auth.jwt_refresh_secret, "y");
        assert!(config.is_production());
        assert!(config.loader_batch_delay.is_zero());
        assert!(config.run_migrations);
    }
}
