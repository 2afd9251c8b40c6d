use std::convert::Infallible;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employment type of a listing.
///
/// Backend values outside the known set decode to `Unknown` so new
/// categories never break deserialization; `Unknown` matches no facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Internship,
    Volunteer,
    #[serde(other)]
    Unknown,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Internship,
        JobType::Volunteer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Internship => "internship",
            JobType::Volunteer => "volunteer",
            JobType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full Time",
            JobType::PartTime => "Part Time",
            JobType::Internship => "Internship",
            JobType::Volunteer => "Volunteer",
            JobType::Unknown => "Other",
        }
    }

    /// Parse a known value. Returns `None` for anything else, including
    /// the literal "unknown".
    pub fn parse(raw: &str) -> Option<JobType> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, JobType::Unknown)
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for JobType {
    type Error = Infallible;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Ok(JobType::parse(raw.trim()).unwrap_or(JobType::Unknown))
    }
}

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Remote,
    Onsite,
    Hybrid,
    #[serde(other)]
    Unknown,
}

impl LocationType {
    pub const ALL: [LocationType; 3] = [
        LocationType::Remote,
        LocationType::Onsite,
        LocationType::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Remote => "remote",
            LocationType::Onsite => "onsite",
            LocationType::Hybrid => "hybrid",
            LocationType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Remote => "Remote",
            LocationType::Onsite => "On-site",
            LocationType::Hybrid => "Hybrid",
            LocationType::Unknown => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<LocationType> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LocationType::Unknown)
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for LocationType {
    type Error = Infallible;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Ok(LocationType::parse(raw.trim()).unwrap_or(LocationType::Unknown))
    }
}

/// A job listing as read from the job source. Read-only to the search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobRecord {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[sqlx(try_from = "String")]
    pub job_type: JobType,
    #[sqlx(try_from = "String")]
    pub location_type: LocationType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    /// First comma-delimited segment of `location`, trimmed.
    /// `None` when the location is missing or that segment is blank.
    pub fn canonical_location(&self) -> Option<&str> {
        self.location.as_deref().and_then(canonical_location)
    }

    /// A job is open while it has no deadline or the deadline has not passed.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_none_or(|d| d >= now)
    }
}

pub fn canonical_location(raw: &str) -> Option<&str> {
    let head = raw.split(',').next().unwrap_or_default().trim();
    (!head.is_empty()).then_some(head)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, TimeZone};

    use super::*;

    pub fn job(title: &str, job_type: JobType, location_type: LocationType) -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme Ltd".to_string(),
            description: String::new(),
            location: Some("Kigali, Rwanda".to_string()),
            job_type,
            location_type,
            category: None,
            application_link: None,
            deadline: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    pub fn at(mut job: JobRecord, location: Option<&str>) -> JobRecord {
        job.location = location.map(str::to_string);
        job
    }

    pub fn aged(mut job: JobRecord, days: i64) -> JobRecord {
        job.created_at += Duration::days(days);
        job
    }
}
