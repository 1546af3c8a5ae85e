pub mod cache_backend;
pub mod metrics_sink;
pub mod refresh_executor;

pub use cache_backend::{CacheBackend, CacheCompactor};
pub use metrics_sink::{MetricsSink, NoopMetricsSink, RefreshTiming};
pub use refresh_executor::RefreshExecutor;
