// Job sources feed the search engine with the collection it filters.
// Implementations return open jobs, newest first.

pub mod file;
pub mod postgres;
pub mod refresh;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::job::JobRecord;

/// Narrows which jobs a source returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobScope {
    #[default]
    All,
    /// Jobs whose location mentions the district, case-insensitively.
    District(String),
    /// Jobs tagged with the category slug.
    Category(String),
}

impl JobScope {
    pub fn includes(&self, job: &JobRecord) -> bool {
        match self {
            JobScope::All => true,
            JobScope::District(district) => {
                let needle = district.to_lowercase();
                job.location
                    .as_deref()
                    .is_some_and(|loc| loc.to_lowercase().contains(&needle))
            }
            JobScope::Category(category) => job.category.as_deref() == Some(category.as_str()),
        }
    }
}

/// Trait for anything that can supply the job collection.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch open jobs, newest first.
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, AppError>;
}

/// Identifies one fetch so its response can be ordered against others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchStamp(u64);

/// Issues fetch stamps and accepts a response only if nothing newer has
/// already been applied.
#[derive(Debug, Default)]
pub struct LatestWins {
    issued: u64,
    applied: Option<FetchStamp>,
}

impl LatestWins {
    pub fn issue(&mut self) -> FetchStamp {
        self.issued += 1;
        FetchStamp(self.issued)
    }

    pub fn accept(&mut self, stamp: FetchStamp) -> bool {
        if self.applied.is_some_and(|applied| applied >= stamp) {
            return false;
        }
        self.applied = Some(stamp);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::fixtures::*;
    use crate::models::job::{JobType, LocationType};

    #[test]
    fn stale_stamp_is_rejected_after_newer_one() {
        let mut seq = LatestWins::default();
        let slow = seq.issue();
        let fast = seq.issue();
        assert!(seq.accept(fast));
        assert!(!seq.accept(slow));
    }

    #[test]
    fn in_order_responses_are_all_accepted() {
        let mut seq = LatestWins::default();
        let a = seq.issue();
        assert!(seq.accept(a));
        let b = seq.issue();
        assert!(seq.accept(b));
        assert!(!seq.accept(b));
    }

    #[test]
    fn district_scope_matches_location_substring() {
        let scope = JobScope::District("gasabo".into());
        let j = at(job("Dev", JobType::FullTime, LocationType::Onsite), Some("Kigali, Gasabo"));
        assert!(scope.includes(&j));
        assert!(!scope.includes(&at(j.clone(), Some("Huye"))));
        assert!(!scope.includes(&at(j, None)));
    }

    #[test]
    fn category_scope_matches_exact_slug() {
        let mut j = job("Dev", JobType::FullTime, LocationType::Onsite);
        assert!(!JobScope::Category("it".into()).includes(&j));
        j.category = Some("it".into());
        assert!(JobScope::Category("it".into()).includes(&j));
        assert!(JobScope::All.includes(&j));
    }
}
