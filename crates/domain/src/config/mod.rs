//! Configuration module for Ferrous Reports
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding
//! - `database`: Postgres connection used for view refreshes
//! - `cache`: Response cache settings
//! - `refresh`: View catalog and refresh coordinator settings
//! - `metrics`: Prometheus pushgateway settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod database;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod refresh;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use refresh::RefreshConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
