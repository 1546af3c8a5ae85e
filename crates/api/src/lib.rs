pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::{create_api_routes, VIEWS_REPORT_TTL};
pub use state::AppState;
