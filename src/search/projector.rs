use chrono::{DateTime, Utc};

use crate::models::job::JobRecord;
use crate::search::filter::{FilterState, matches};

/// Stable filter of `jobs` by `filter`. Relative order is preserved.
pub fn project<'a>(jobs: &'a [JobRecord], filter: &FilterState) -> Vec<&'a JobRecord> {
    jobs.iter().filter(|job| matches(job, filter)).collect()
}

/// Order newest first. Stable, so equal timestamps keep their input order.
pub fn newest_first(jobs: &mut [JobRecord]) {
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Drop listings whose deadline has passed.
pub fn retain_open(jobs: &mut Vec<JobRecord>, now: DateTime<Utc>) {
    jobs.retain(|job| job.is_open(now));
}
