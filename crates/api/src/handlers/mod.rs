pub mod health;
pub mod metrics;
pub mod refresh;
pub mod views;

pub use health::health_check;
pub use metrics::get_metrics;
pub use refresh::trigger_refresh;
pub use views::get_views_report;
