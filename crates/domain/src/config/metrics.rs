use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Prometheus pushgateway base URL. Refresh timings are pushed there
    /// once per refresh cycle when set.
    pub pushgateway_url: Option<String>,

    /// Job label used when pushing (default: "ferrous-reports-matviews")
    pub push_job_name: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            pushgateway_url: None,
            push_job_name: "ferrous-reports-matviews".to_string(),
        }
    }
}
