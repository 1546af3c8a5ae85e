use async_trait::async_trait;
use ferrous_reports_domain::DomainError;

/// A timing observation, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshTiming {
    /// One view reached a refreshed terminal state.
    View { view: String, millis: f64 },
    /// A whole refresh cycle finished, whatever its per-view results.
    AllViews { millis: f64 },
}

#[async_trait]
pub trait MetricsSink: Send + Sync {
    fn observe(&self, timing: RefreshTiming);

    /// Whether `push` has somewhere to send observations.
    fn push_configured(&self) -> bool {
        false
    }

    /// Export accumulated observations to the push endpoint.
    async fn push(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Sink that drops everything.
pub struct NoopMetricsSink;

#[async_trait]
impl MetricsSink for NoopMetricsSink {
    fn observe(&self, _timing: RefreshTiming) {}
}
