use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::AppError;
use crate::models::job::JobRecord;
use crate::source::{JobScope, JobSource};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Reads open jobs from the `jobs` table. Read-only; the schema belongs to
/// the job board that owns the table.
pub struct PgJobSource {
    pool: PgPool,
    scope: JobScope,
}

impl PgJobSource {
    pub fn new(pool: PgPool, scope: JobScope) -> Self {
        Self { pool, scope }
    }
}

#[async_trait]
impl JobSource for PgJobSource {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, AppError> {
        let (district, category) = match &self.scope {
            JobScope::All => (None, None),
            JobScope::District(d) => (Some(d.as_str()), None),
            JobScope::Category(c) => (None, Some(c.as_str())),
        };

        let jobs = sqlx::query_as::<_, JobRecord>(
            "SELECT id, title, company, COALESCE(description, '') AS description, location, job_type, location_type, category, application_link, deadline, created_at FROM jobs WHERE (deadline IS NULL OR deadline >= NOW()) AND ($1::text IS NULL OR location ILIKE '%' || $1 || '%') AND ($2::text IS NULL OR category = $2) ORDER BY created_at DESC",
        )
        .bind(district)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Fetched {} open jobs ({:?})", jobs.len(), self.scope);
        Ok(jobs)
    }
}
