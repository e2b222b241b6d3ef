use crate::domain::entities::DEFAULT_RESOLVED_STATUS;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Status name that marks a ticket as resolved.
    pub resolved_status: String,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://ticketsla.db?mode=rwc".to_string(),
            resolved_status: DEFAULT_RESOLVED_STATUS.to_string(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        if database_url.trim().is_empty() {
            return Err(ConfigError::Empty("DATABASE_URL"));
        }

        let resolved_status = env::var("RESOLVED_STATUS").unwrap_or(defaults.resolved_status);
        if resolved_status.trim().is_empty() {
            return Err(ConfigError::Empty("RESOLVED_STATUS"));
        }

        let log_filter = env::var("LOG_FILTER").ok().filter(|f| !f.trim().is_empty());

        Ok(Config {
            database_url,
            resolved_status,
            log_filter,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is set but empty")]
    Empty(&'static str),
}
