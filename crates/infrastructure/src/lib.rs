pub mod cache;
pub mod database;
pub mod metrics;
pub mod refresh;
