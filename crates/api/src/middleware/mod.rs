pub mod response_cache;

pub use response_cache::{cache_response, cached, ResponseCacheState};
