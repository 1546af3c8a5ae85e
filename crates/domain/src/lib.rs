//! Ferrous Reports Domain Layer
pub mod cached_response;
pub mod config;
pub mod errors;
pub mod validators;
pub mod view_refresh;

pub use cached_response::{CacheKey, CachedResponse, CACHE_HIT_HEADER};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use view_refresh::{
    MaterializedView, RefreshCycleReport, RefreshMode, RefreshOutcome, ViewCatalog,
    ViewRefreshTask,
};
