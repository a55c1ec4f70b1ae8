use std::env;
use std::fmt;

const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE_NAME: &str = "task_manager";

/// Which `DocumentStore` backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidPort(String),
    UnknownStore(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => write!(f, "PORT must be a number, got '{}'", value),
            ConfigError::UnknownStore(value) => {
                write!(f, "STORE must be 'mongodb' or 'memory', got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub store: StoreKind,
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => 5000,
        };

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let database_name = lookup("DATABASE_NAME")
            .filter(|name| !name.is_empty())
            .or_else(|| database_name_from_url(&database_url))
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        let store = match lookup("STORE").as_deref().map(str::trim) {
            None | Some("") | Some("mongodb") | Some("mongo") => StoreKind::Mongo,
            Some("memory") => StoreKind::Memory,
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self {
            host,
            port,
            database_url,
            database_name,
            store,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database name from the path part of a MongoDB URI, if there is one:
/// `mongodb://host:27017/tasks?retryWrites=true` -> `tasks`
fn database_name_from_url(url: &str) -> Option<String> {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest)?;
    let (_, path) = without_scheme.split_once('/')?;
    let name = path.split('?').next().unwrap_or_default();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
