pub mod prometheus_sink;

pub use prometheus_sink::PrometheusMetricsSink;
