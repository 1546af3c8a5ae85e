//! Prometheus-backed refresh timings.
//!
//! Each sink owns its own registry, so tests and multiple server instances
//! never share state. The registry can be scraped through `render` and is
//! pushed to a pushgateway after every refresh cycle when one is configured.

use async_trait::async_trait;
use ferrous_reports_application::ports::{MetricsSink, RefreshTiming};
use ferrous_reports_domain::config::MetricsConfig;
use ferrous_reports_domain::DomainError;
use prometheus::{Encoder, Histogram, HistogramOpts, HistogramVec, Registry, TextEncoder};
use tracing::debug;

/// Per-view refresh latency buckets (milliseconds)
const VIEW_REFRESH_BUCKETS: &[f64] = &[
    10.0, 100.0, 200.0, 500.0, 1000.0, 5000.0, 10000.0, 30000.0, 60000.0, 300000.0,
];

/// Whole-cycle refresh latency buckets (milliseconds), up to one hour
const ALL_VIEWS_REFRESH_BUCKETS: &[f64] = &[
    5000.0, 10000.0, 30000.0, 60000.0, 300000.0, 600000.0, 1200000.0, 1800000.0, 2400000.0,
    3000000.0, 3600000.0,
];

struct PushGateway {
    client: reqwest::Client,
    endpoint: String,
}

pub struct PrometheusMetricsSink {
    registry: Registry,
    view_refresh_millis: HistogramVec,
    all_views_refresh_millis: Histogram,
    pushgateway: Option<PushGateway>,
}

impl PrometheusMetricsSink {
    pub fn new(cfg: &MetricsConfig) -> Result<Self, DomainError> {
        let registry = Registry::new();

        let view_refresh_millis = HistogramVec::new(
            HistogramOpts::new(
                "report_matview_refresh_millis",
                "Milliseconds to refresh a materialized view",
            )
            .buckets(VIEW_REFRESH_BUCKETS.to_vec()),
            &["view"],
        )
        .map_err(|e| DomainError::Metrics(format!("Failed to create view histogram: {e}")))?;

        let all_views_refresh_millis = Histogram::with_opts(
            HistogramOpts::new(
                "report_all_matviews_refresh_millis",
                "Milliseconds to refresh all materialized views",
            )
            .buckets(ALL_VIEWS_REFRESH_BUCKETS.to_vec()),
        )
        .map_err(|e| DomainError::Metrics(format!("Failed to create cycle histogram: {e}")))?;

        registry
            .register(Box::new(view_refresh_millis.clone()))
            .map_err(|e| DomainError::Metrics(format!("Failed to register view histogram: {e}")))?;
        registry
            .register(Box::new(all_views_refresh_millis.clone()))
            .map_err(|e| DomainError::Metrics(format!("Failed to register cycle histogram: {e}")))?;

        let pushgateway = cfg.pushgateway_url.as_deref().map(|base| PushGateway {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/metrics/job/{}",
                base.trim_end_matches('/'),
                cfg.push_job_name
            ),
        });

        Ok(Self {
            registry,
            view_refresh_millis,
            all_views_refresh_millis,
            pushgateway,
        })
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> Result<String, DomainError> {
        TextEncoder::new()
            .encode_to_string(&self.registry.gather())
            .map_err(|e| DomainError::Metrics(format!("Failed to encode metrics: {e}")))
    }
}

#[async_trait]
impl MetricsSink for PrometheusMetricsSink {
    fn observe(&self, timing: RefreshTiming) {
        match timing {
            RefreshTiming::View { view, millis } => self
                .view_refresh_millis
                .with_label_values(&[view.as_str()])
                .observe(millis),
            RefreshTiming::AllViews { millis } => self.all_views_refresh_millis.observe(millis),
        }
    }

    fn push_configured(&self) -> bool {
        self.pushgateway.is_some()
    }

    async fn push(&self) -> Result<(), DomainError> {
        let Some(gateway) = &self.pushgateway else {
            return Ok(());
        };

        let body = self.render()?;
        debug!(endpoint = %gateway.endpoint, bytes = body.len(), "Pushing metrics");

        gateway
            .client
            .post(&gateway.endpoint)
            .header(reqwest::header::CONTENT_TYPE, TextEncoder::new().format_type())
            .body(body)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map(|_| ())
            .map_err(|e| DomainError::MetricsPush(e.to_string()))
    }
}
