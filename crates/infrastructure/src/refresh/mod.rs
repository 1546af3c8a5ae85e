pub mod postgres;

pub use postgres::PostgresRefreshExecutor;
