use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::job::JobRecord;
use crate::search::projector::{newest_first, retain_open};
use crate::source::{JobScope, JobSource};

/// Reads a JSON array of jobs from disk on every fetch.
pub struct FileJobSource {
    path: PathBuf,
    scope: JobScope,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>, scope: JobScope) -> Self {
        Self {
            path: path.into(),
            scope,
        }
    }
}

#[async_trait]
impl JobSource for FileJobSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, AppError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let mut jobs: Vec<JobRecord> = serde_json::from_slice(&bytes)?;
        let total = jobs.len();

        retain_open(&mut jobs, Utc::now());
        jobs.retain(|job| self.scope.includes(job));
        newest_first(&mut jobs);

        tracing::debug!(
            "Loaded {} of {total} jobs from {}",
            jobs.len(),
            self.path.display()
        );
        Ok(jobs)
    }
}
