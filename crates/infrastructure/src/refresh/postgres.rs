use async_trait::async_trait;
use ferrous_reports_application::ports::RefreshExecutor;
use ferrous_reports_domain::validators::validate_view_name;
use ferrous_reports_domain::DomainError;
use sqlx::PgPool;
use tracing::{debug, instrument};

/// Refreshes Postgres materialized views.
///
/// View names are interpolated into the statements, so every name is
/// re-validated as a plain SQL identifier before use.
pub struct PostgresRefreshExecutor {
    pool: PgPool,
}

impl PostgresRefreshExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn execute(&self, statement: String) -> Result<(), DomainError> {
        debug!(statement = %statement, "Executing refresh statement");
        sqlx::query(&statement)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::DatabaseError(e.to_string()))
    }
}

fn checked(view: &str) -> Result<&str, DomainError> {
    validate_view_name(view).map_err(DomainError::InvalidViewName)?;
    Ok(view)
}

#[async_trait]
impl RefreshExecutor for PostgresRefreshExecutor {
    #[instrument(skip(self))]
    async fn row_count(&self, view: &str) -> Result<i64, DomainError> {
        let view = checked(view)?;
        let statement = format!("SELECT COUNT(*) FROM {view}");
        sqlx::query_scalar::<_, i64>(&statement)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn refresh_concurrent(&self, view: &str) -> Result<(), DomainError> {
        let view = checked(view)?;
        self.execute(format!("REFRESH MATERIALIZED VIEW CONCURRENTLY {view}"))
            .await
    }

    #[instrument(skip(self))]
    async fn refresh_blocking(&self, view: &str) -> Result<(), DomainError> {
        let view = checked(view)?;
        self.execute(format!("REFRESH MATERIALIZED VIEW {view}")).await
    }
}
