pub mod cache_compaction;
pub mod runner;
pub mod view_refresh;

pub use cache_compaction::CacheCompactionJob;
pub use runner::JobRunner;
pub use view_refresh::ViewRefreshJob;
