use serde::{Deserialize, Serialize};

/// Backing view refresh configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Size of the refresh worker pool (default: 3)
    pub workers: usize,

    /// Upper bound for a single refresh statement (default: 1800)
    pub view_timeout_secs: u64,

    /// Refresh empty views once at startup (default: true)
    pub refresh_on_startup: bool,

    /// Periodic full refresh interval; 0 disables it (default: 0)
    pub interval_secs: u64,

    /// Views to refresh, in order
    pub views: Vec<String>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            view_timeout_secs: 1800,
            refresh_on_startup: true,
            interval_secs: 0,
            views: default_views(),
        }
    }
}

fn default_views() -> Vec<String> {
    [
        "test_report_7d_matview",
        "test_report_2d_matview",
        "test_analysis_by_job_by_dates_matview",
        "job_runs_report_matview",
        "job_results_7d_matview",
        "job_results_2d_matview",
        "payload_test_failures_14d_matview",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
