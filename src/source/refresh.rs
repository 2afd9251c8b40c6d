use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::AppError;
use crate::models::job::JobRecord;
use crate::source::{FetchStamp, JobSource, LatestWins};

/// Latest job collection shared by request handlers.
#[derive(Clone, Default)]
pub struct Catalog {
    inner: Arc<RwLock<CatalogState>>,
}

#[derive(Default)]
struct CatalogState {
    jobs: Arc<Vec<JobRecord>>,
    sequence: LatestWins,
    refreshed_at: Option<DateTime<Utc>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current collection. Cheap to clone and hold.
    pub async fn jobs(&self) -> Arc<Vec<JobRecord>> {
        self.inner.read().await.jobs.clone()
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.refreshed_at
    }

    pub async fn begin_fetch(&self) -> FetchStamp {
        self.inner.write().await.sequence.issue()
    }

    /// Install `jobs` unless a newer fetch has already been installed.
    pub async fn complete_fetch(&self, stamp: FetchStamp, jobs: Vec<JobRecord>) -> bool {
        let mut state = self.inner.write().await;
        if !state.sequence.accept(stamp) {
            tracing::debug!("Discarding stale fetch {stamp:?}");
            return false;
        }
        state.jobs = Arc::new(jobs);
        state.refreshed_at = Some(Utc::now());
        true
    }

    /// Fetch from `source` and install the result. Returns the number of
    /// jobs installed, or `None` when a newer fetch finished first and this
    /// one was discarded. On failure the previous collection stays in place.
    pub async fn refresh(&self, source: &dyn JobSource) -> Result<Option<usize>, AppError> {
        let stamp = self.begin_fetch().await;
        let jobs = source.fetch_jobs().await?;
        let count = jobs.len();
        Ok(self.complete_fetch(stamp, jobs).await.then_some(count))
    }
}

/// Refresh `catalog` from `source` every `interval` until Ctrl-C.
///
/// The first refresh happens one `interval` after the call; callers load the
/// catalog up front.
pub async fn run(catalog: Catalog, source: Arc<dyn JobSource>, interval: Duration) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(
        "Refreshing jobs from '{}' every {}s",
        source.name(),
        interval.as_secs()
    );

    loop {
        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received, stopping refresh");
                break;
            }
            _ = ticker.tick() => {
                match catalog.refresh(source.as_ref()).await {
                    Ok(Some(count)) => tracing::info!("Catalog refreshed: {count} open jobs"),
                    Ok(None) => tracing::debug!("Refresh superseded by a newer fetch"),
                    Err(e) => tracing::warn!("Refresh from '{}' failed: {e}", source.name()),
                }
            }
        }
    }
}
