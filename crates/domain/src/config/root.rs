use super::{
    CacheConfig, ConfigError, DatabaseConfig, LoggingConfig, MetricsConfig, RefreshConfig,
    ServerConfig,
};
use crate::validators::validate_url;
use crate::ViewCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "ferrous-reports.toml";
pub const PUSHGATEWAY_ENV: &str = "FERROUS_REPORTS_PUSHGATEWAY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub refresh: RefreshConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub web_port: Option<u16>,
    pub database_url: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load from `config_path`, or from `ferrous-reports.toml` in the working
    /// directory if it exists, or fall back to defaults. Environment and CLI
    /// overrides are applied on top.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(PUSHGATEWAY_ENV).filter(|v| !v.is_empty()) {
            self.metrics.pushgateway_url = Some(url);
        }
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(url) = overrides.database_url {
            self.database.url = Some(url);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server
            .socket_addr()
            .map_err(|e| ConfigError::Validation(format!("server.bind_address: {e}")))?;
        if self.refresh.workers == 0 {
            return Err(ConfigError::Validation(
                "refresh.workers must be at least 1".to_string(),
            ));
        }
        if self.refresh.view_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh.view_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries must be at least 1".to_string(),
            ));
        }
        if let Some(url) = &self.metrics.pushgateway_url {
            validate_url(url)
                .map_err(|e| ConfigError::Validation(format!("metrics.pushgateway_url: {e}")))?;
        }
        self.view_catalog()?;
        Ok(())
    }

    pub fn view_catalog(&self) -> Result<ViewCatalog, ConfigError> {
        ViewCatalog::new(&self.refresh.views)
            .map_err(|e| ConfigError::Validation(format!("refresh.views: {e}")))
    }
}
