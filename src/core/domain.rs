use std::collections::HashMap;
use std::env;
use serde::{Deserialize, Serialize};
use tracing::Level;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

const ENV_PREFIX: &str = "CATALOG";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
}

// RuntimeMode selects how the HTTP surface is served
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Server,
    Lambda,
}

// Configuration abstracts config options for the bookshelf service.
// Every field can be overridden by a `CATALOG_`-prefixed environment variable.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "branch")]
    pub branch_id: String,
    pub store: RepositoryStore,
    #[serde(rename = "db_path")]
    pub database_path: String,
    pub bind_addr: String,
    #[serde(rename = "page_size")]
    pub default_page_size: usize,
    pub runtime: RuntimeMode,
    pub log_level: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new("dev")
    }
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            store: RepositoryStore::LocalSqlite,
            database_path: "bookshelf.db".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            default_page_size: 5,
            runtime: RuntimeMode::Server,
            log_level: "info".to_string(),
        }
    }

    pub fn from_env() -> LibraryResult<Self> {
        Self::load(None, env::var("PORT").ok())
    }

    // `vars` replaces the process environment when given, `port` is the unprefixed PORT
    // honoured when no bind address is configured
    pub(crate) fn load(vars: Option<HashMap<String, String>>, port: Option<String>) -> LibraryResult<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(vars))
            .build()
            .map_err(config_error)?;
        let bind_addr_set = cfg.get::<String>("bind_addr").is_ok();
        let mut config: Configuration = cfg.try_deserialize().map_err(config_error)?;
        if let (false, Some(port)) = (bind_addr_set, port) {
            let port = port.parse::<u16>().map_err(|_| invalid("PORT", port.as_str()))?;
            config.bind_addr = format!("0.0.0.0:{}", port);
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> LibraryResult<()> {
        if self.default_page_size == 0 {
            return Err(invalid("CATALOG_PAGE_SIZE", "0"));
        }
        self.tracing_level().map(|_| ())
    }

    pub fn tracing_level(&self) -> LibraryResult<Level> {
        self.log_level.parse::<Level>().map_err(|_| invalid("CATALOG_LOG_LEVEL", self.log_level.as_str()))
    }
}

fn invalid(key: &str, value: &str) -> LibraryError {
    LibraryError::validation(format!("invalid value {:?} for {}", value, key).as_str(), Some(key.to_string()))
}

fn config_error(err: config::ConfigError) -> LibraryError {
    LibraryError::validation(format!("invalid configuration: {}", err).as_str(), None)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use tracing::Level;
    use crate::core::domain::{Configuration, RuntimeMode};
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;

    fn load(vars: &[(&str, &str)]) -> Result<Configuration, LibraryError> {
        let port = vars.iter().find(|(k, _)| *k == "PORT").map(|(_, v)| v.to_string());
        let vars: HashMap<String, String> = vars.iter()
            .filter(|(k, _)| *k != "PORT")
            .map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Configuration::load(Some(vars), port)
    }

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!(5, config.default_page_size);
        assert_eq!(RepositoryStore::LocalSqlite, config.store);
        assert_eq!(RuntimeMode::Server, config.runtime);
    }

    #[tokio::test]
    async fn test_should_load_config_from_env() {
        let config = load(&[
            ("CATALOG_BRANCH", "north"),
            ("CATALOG_STORE", "sqlite"),
            ("CATALOG_DB_PATH", "/tmp/books.db"),
            ("PORT", "8080"),
            ("CATALOG_PAGE_SIZE", "10"),
            ("CATALOG_RUNTIME", "lambda"),
            ("CATALOG_LOG_LEVEL", "debug"),
        ]).expect("should load config");
        assert_eq!("north", config.branch_id);
        assert_eq!(RepositoryStore::Sqlite, config.store);
        assert_eq!("/tmp/books.db", config.database_path);
        assert_eq!("0.0.0.0:8080", config.bind_addr);
        assert_eq!(10, config.default_page_size);
        assert_eq!(RuntimeMode::Lambda, config.runtime);
        assert_eq!(Level::DEBUG, config.tracing_level().expect("should parse level"));
    }

    #[tokio::test]
    async fn test_should_prefer_bind_addr_over_port() {
        let config = load(&[("CATALOG_BIND_ADDR", "127.0.0.1:4000"), ("PORT", "8080")])
            .expect("should load config");
        assert_eq!("127.0.0.1:4000", config.bind_addr);
    }

    #[tokio::test]
    async fn test_should_default_config_from_empty_env() {
        let config = load(&[]).expect("should load config");
        assert_eq!(Configuration::new("dev"), config);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_config() {
        assert!(load(&[("CATALOG_STORE", "dynamo")]).is_err());
        assert!(load(&[("CATALOG_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("CATALOG_PAGE_SIZE", "many")]).is_err());
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("CATALOG_RUNTIME", "cron")]).is_err());
    }

    #[tokio::test]
    async fn test_should_reject_unknown_log_level() {
        let config = load(&[("CATALOG_LOG_LEVEL", "WARN")]).expect("should load config");
        assert_eq!(Level::WARN, config.tracing_level().expect("should parse level"));
        let err = load(&[("CATALOG_LOG_LEVEL", "chatty")]).expect_err("should reject level");
        assert!(matches!(err, LibraryError::Validation { field: Some(ref f), .. } if f == "CATALOG_LOG_LEVEL"));
    }
}
