use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "ws://localhost:10001";
const DEFAULT_NAMESPACE: &str = "tv_locker";
const DEFAULT_DATABASE: &str = "tv_locker";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDRESS `{0}` is not a valid socket address")]
    InvalidBindAddress(String),
    #[error("DATABASE_USER and DATABASE_PASSWORD must be set together")]
    PartialCredentials,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_raw = value("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddress(bind_raw.clone()))?;

        let url = value("DATABASE_URL")
            .or_else(|| value("SURREAL_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let username = value("DATABASE_USER");
        let password = value("DATABASE_PASSWORD");
        if username.is_some() != password.is_some() {
            return Err(ConfigError::PartialCredentials);
        }

        Ok(Self {
            bind_address,
            database: DatabaseConfig {
                url,
                namespace: value("DATABASE_NAMESPACE")
                    .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
                database: value("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                username,
                password,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("defaults are valid");

        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.database.database, DEFAULT_DATABASE);
        assert!(config.database.username.is_none());
    }

    #[test]
    fn surreal_url_is_used_as_fallback() {
        let config = AppConfig::from_lookup(lookup(&[("SURREAL_URL", "mem://")])).unwrap();
        assert_eq!(config.database.url, "mem://");

        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "ws://db:8000"),
            ("SURREAL_URL", "mem://"),
        ]))
        .unwrap();
        assert_eq!(config.database.url, "ws://db:8000");
    }

    #[test]
    fn rejects_invalid_bind_address() {
        let err = AppConfig::from_lookup(lookup(&[("BIND_ADDRESS", "localhost")]))
            .expect_err("hostname without port is invalid");
        assert!(matches!(err, ConfigError::InvalidBindAddress(_)));
    }

    #[test]
    fn credentials_must_come_in_pairs() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_USER", "root")]))
            .expect_err("password missing");
        assert!(matches!(err, ConfigError::PartialCredentials));

        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_USER", "root"),
            ("DATABASE_PASSWORD", "root"),
        ]))
        .unwrap();
        assert_eq!(config.database.username.as_deref(), Some("root"));
    }
}
