use ferrous_reports_domain::config::DatabaseConfig;
use ferrous_reports_infrastructure::database::create_pool;
use sqlx::PgPool;
use tracing::{error, info};

pub async fn init_database(database_url: &str, cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    info!("Connecting to database");

    let pool = create_pool(database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize database pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        max_connections = cfg.max_connections,
        "Database initialized successfully"
    );

    Ok(pool)
}
