use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("unknown store {0:?}, expected \"postgres\" or \"memory\"")]
    UnknownStore(String),
    #[error("unknown ssl mode {0:?}, expected \"disable\", \"prefer\" or \"require\"")]
    UnknownSslMode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    Disable,
    Prefer,
    Require,
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: SslMode,
    pub pool_size: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = match self.url.as_deref().map(PgConnectOptions::from_str) {
            Some(Ok(options)) => return options,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "DATABASE_URL unusable, falling back to DB_* settings");
                PgConnectOptions::new()
            }
            None => PgConnectOptions::new(),
        };
        options
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreKind,
    pub database: DatabaseConfig,
    pub address: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let store = match get("RECIPES_STORE", "postgres").to_lowercase().as_str() {
            "postgres" => StoreKind::Postgres,
            "memory" => StoreKind::Memory,
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let ssl_mode = match get("DB_SSL_MODE", "prefer").to_lowercase().as_str() {
            "disable" => SslMode::Disable,
            "prefer" => SslMode::Prefer,
            "require" => SslMode::Require,
            other => return Err(ConfigError::UnknownSslMode(other.to_string())),
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            host: get("DB_HOST", "localhost"),
            port: parse("DB_PORT", get("DB_PORT", "5432"))?,
            user: get("DB_USER", "postgres"),
            password: get("DB_PASSWORD", ""),
            name: get("DB_NAME", "recipes"),
            ssl_mode,
            pool_size: parse("DB_POOL_SIZE", get("DB_POOL_SIZE", "5"))?,
        };

        Ok(Config {
            store,
            database,
            address: parse("ADDRESS", get("ADDRESS", "0.0.0.0"))?,
            port: parse("PORT", get("PORT", "8080"))?,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.store, StoreKind::Postgres);
        assert_eq!(config.port, 8080);
        assert_eq!(config.address.to_string(), "0.0.0.0");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.database.url, None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("RECIPES_STORE", "Memory"),
            ("PORT", "3000"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_SSL_MODE", "require"),
            ("DATABASE_URL", "postgres://u:p@h/db"),
        ])
        .unwrap();
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.port, 3000);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.ssl_mode, SslMode::Require);
        assert_eq!(config.database.url.as_deref(), Some("postgres://u:p@h/db"));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue {
                key: "PORT",
                value: "eighty".to_string()
            })
        );
        assert_eq!(
            config(&[("RECIPES_STORE", "mongo")]),
            Err(ConfigError::UnknownStore("mongo".to_string()))
        );
        assert_eq!(
            config(&[("DB_SSL_MODE", "verify")]),
            Err(ConfigError::UnknownSslMode("verify".to_string()))
        );
    }
}
