use sqlx::ConnectOptions;
use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USER: &str = "root";
const DEFAULT_DATABASE: &str = "voting_db";
const DEFAULT_PORT: u16 = 3306;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Connection and runtime settings, read from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    pub init_schema: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            host: DEFAULT_HOST.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            port: DEFAULT_PORT,
            init_schema: false,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real environment variables still apply
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("BALLOT_DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "BALLOT_DB_PORT",
                    value: raw,
                })?,
            None => defaults.port,
        };

        let init_schema = match non_empty("BALLOT_INIT_SCHEMA") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                key: "BALLOT_INIT_SCHEMA",
                value: raw,
            })?,
            None => defaults.init_schema,
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            host: non_empty("BALLOT_DB_HOST").unwrap_or(defaults.host),
            user: non_empty("BALLOT_DB_USER").unwrap_or(defaults.user),
            password: lookup("BALLOT_DB_PASSWORD").unwrap_or(defaults.password),
            database: non_empty("BALLOT_DB_NAME").unwrap_or(defaults.database),
            port,
            init_schema,
            log_file: non_empty("BALLOT_LOG_FILE").map(PathBuf::from),
        })
    }

    /// URL handed to the database driver. `DATABASE_URL` wins over the
    /// discrete MySQL parameters.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .port(self.port)
            .to_url_lossy()
            .to_string()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.user, "root");
        assert_eq!(config.database, "voting_db");
        assert_eq!(config.port, 3306);
        assert!(!config.init_schema);
        assert!(config.database_url.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_database_url_wins() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://votes.db?mode=rwc"),
            ("BALLOT_DB_HOST", "db.internal"),
        ]))
        .unwrap();
        assert_eq!(config.connection_url(), "sqlite://votes.db?mode=rwc");
    }

    #[test]
    fn test_mysql_url_from_parts() {
        let config = Config::from_lookup(lookup_from(&[
            ("BALLOT_DB_HOST", "db.internal"),
            ("BALLOT_DB_PORT", "3307"),
            ("BALLOT_DB_NAME", "election"),
        ]))
        .unwrap();
        let url = config.connection_url();
        assert!(url.starts_with("mysql://"));
        assert!(url.contains("db.internal"));
        assert!(url.contains("3307"));
        assert!(url.contains("election"));
    }

    #[test]
    fn test_password_is_escaped_in_url() {
        let config =
            Config::from_lookup(lookup_from(&[("BALLOT_DB_PASSWORD", "pa#ss")])).unwrap();
        let url = config.connection_url();
        assert!(!url.contains("pa#ss"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("BALLOT_DB_PORT", "eighty")])).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, "BALLOT_DB_PORT");
                assert_eq!(value, "eighty");
            }
        }
    }

    #[test]
    fn test_flags() {
        let config = Config::from_lookup(lookup_from(&[
            ("BALLOT_INIT_SCHEMA", "true"),
            ("BALLOT_LOG_FILE", "ballot.log"),
        ]))
        .unwrap();
        assert!(config.init_schema);
        assert_eq!(config.log_file, Some(PathBuf::from("ballot.log")));

        assert!(Config::from_lookup(lookup_from(&[("BALLOT_INIT_SCHEMA", "maybe")])).is_err());
    }
}
