use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::AppError;
use crate::models::job::{JobRecord, JobType, LocationType};

/// A filter dimension with a discrete set of selectable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    JobType,
    LocationType,
    Location,
}

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetValue {
    JobType(JobType),
    LocationType(LocationType),
    Location(String),
}

impl FacetValue {
    /// Convert host input into a typed facet value. Unknown enum values are
    /// rejected here rather than silently selecting nothing.
    pub fn parse(facet: Facet, raw: &str) -> Result<FacetValue, AppError> {
        let raw = raw.trim();
        match facet {
            Facet::JobType => JobType::parse(raw)
                .map(FacetValue::JobType)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown job type '{raw}'"))),
            Facet::LocationType => LocationType::parse(raw)
                .map(FacetValue::LocationType)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown location type '{raw}'"))),
            Facet::Location if raw.is_empty() => {
                Err(AppError::BadRequest("Empty location".to_string()))
            }
            Facet::Location => Ok(FacetValue::Location(raw.to_string())),
        }
    }
}

/// Active search term and facet selections.
///
/// A facet that is `None` is unconstrained. Selections are never stored as
/// `Some(empty)`: removing the last value reverts the facet to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_term: Option<String>,
    pub job_type: Option<BTreeSet<JobType>>,
    pub location_type: Option<BTreeSet<LocationType>>,
    pub location: Option<BTreeSet<String>>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }

    /// Set the applied search term. Blank terms clear it.
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        self.search_term = (!term.is_empty()).then(|| term.to_string());
    }

    /// Add or remove a facet value. Returns whether the state changed.
    pub fn toggle(&mut self, value: FacetValue, checked: bool) -> bool {
        match value {
            FacetValue::JobType(v) => toggle_in(&mut self.job_type, v, checked),
            FacetValue::LocationType(v) => toggle_in(&mut self.location_type, v, checked),
            FacetValue::Location(v) => toggle_in(&mut self.location, v, checked),
        }
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.set_search(term);
        self
    }

    pub fn with(mut self, value: FacetValue) -> Self {
        self.toggle(value, true);
        self
    }

    pub fn is_selected(&self, value: &FacetValue) -> bool {
        match value {
            FacetValue::JobType(v) => self.job_type.as_ref().is_some_and(|s| s.contains(v)),
            FacetValue::LocationType(v) => {
                self.location_type.as_ref().is_some_and(|s| s.contains(v))
            }
            FacetValue::Location(v) => self.location.as_ref().is_some_and(|s| s.contains(v)),
        }
    }
}

fn toggle_in<T: Ord>(slot: &mut Option<BTreeSet<T>>, value: T, checked: bool) -> bool {
    let changed = if checked {
        slot.get_or_insert_with(BTreeSet::new).insert(value)
    } else {
        slot.as_mut().is_some_and(|set| set.remove(&value))
    };
    if slot.as_ref().is_some_and(BTreeSet::is_empty) {
        *slot = None;
    }
    changed
}

/// Whether `job` passes every active constraint in `filter`.
pub fn matches(job: &JobRecord, filter: &FilterState) -> bool {
    matches_search(job, filter.search_term.as_deref())
        && facet_allows(filter.job_type.as_ref(), |set| {
            job.job_type.is_known() && set.contains(&job.job_type)
        })
        && facet_allows(filter.location_type.as_ref(), |set| {
            job.location_type.is_known() && set.contains(&job.location_type)
        })
        && facet_allows(filter.location.as_ref(), |set| {
            job.canonical_location().is_some_and(|loc| set.contains(loc))
        })
}

fn facet_allows<T>(selected: Option<&BTreeSet<T>>, hit: impl FnOnce(&BTreeSet<T>) -> bool) -> bool {
    match selected {
        Some(set) if !set.is_empty() => hit(set),
        _ => true,
    }
}

fn matches_search(job: &JobRecord, term: Option<&str>) -> bool {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return true;
    };
    let needle = term.to_lowercase();
    [&job.title, &job.company, &job.description]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::fixtures::*;

    fn backend() -> JobRecord {
        job("Senior Backend Engineer", JobType::FullTime, LocationType::Remote)
    }

    #[test]
    fn search_is_case_insensitive() {
        let j = backend();
        assert!(matches(&j, &FilterState::default().with_search("backend")));
        assert!(matches(&j, &FilterState::default().with_search("BACKEND")));
        assert!(!matches(&j, &FilterState::default().with_search("frontend")));
    }

    #[test]
    fn search_covers_company_and_description() {
        let mut j = backend();
        j.description = "Rust services for payments".into();
        assert!(matches(&j, &FilterState::default().with_search("acme")));
        assert!(matches(&j, &FilterState::default().with_search("PAYMENTS")));
    }

    #[test]
    fn blank_search_is_unconstrained() {
        let filter = FilterState {
            search_term: Some("   ".into()),
            ..FilterState::default()
        };
        assert!(matches(&backend(), &filter));
        assert_eq!(FilterState::default().with_search("  "), FilterState::default());
    }

    #[test]
    fn facet_values_are_ored_within_a_facet() {
        let filter = FilterState::default()
            .with(FacetValue::JobType(JobType::PartTime))
            .with(FacetValue::JobType(JobType::FullTime));
        assert!(matches(&backend(), &filter));
        let filter = FilterState::default().with(FacetValue::JobType(JobType::Internship));
        assert!(!matches(&backend(), &filter));
    }

    #[test]
    fn facets_are_anded_across_dimensions() {
        let filter = FilterState::default()
            .with(FacetValue::JobType(JobType::FullTime))
            .with(FacetValue::LocationType(LocationType::Onsite));
        assert!(!matches(&backend(), &filter));
        let filter = FilterState::default()
            .with(FacetValue::JobType(JobType::FullTime))
            .with(FacetValue::LocationType(LocationType::Remote))
            .with(FacetValue::Location("Kigali".into()));
        assert!(matches(&backend(), &filter));
    }

    #[test]
    fn location_facet_uses_canonical_location() {
        let filter = FilterState::default().with(FacetValue::Location("Kigali".into()));
        assert!(matches(&at(backend(), Some("Kigali, East")), &filter));
        assert!(!matches(&at(backend(), Some("Huye, South")), &filter));
        assert!(!matches(&at(backend(), None), &filter));
    }

    #[test]
    fn unknown_enum_values_never_match_a_facet() {
        let j = job("Gig", JobType::Unknown, LocationType::Unknown);
        assert!(matches(&j, &FilterState::default()));
        let mut filter = FilterState::default();
        filter.job_type = Some([JobType::Unknown].into());
        assert!(!matches(&j, &filter));
        let mut filter = FilterState::default();
        filter.location_type = Some([LocationType::Unknown, LocationType::Remote].into());
        assert!(!matches(&j, &filter));
    }

    #[test]
    fn empty_selection_set_is_unconstrained() {
        let filter = FilterState {
            job_type: Some(BTreeSet::new()),
            ..FilterState::default()
        };
        assert!(matches(&backend(), &filter));
    }

    #[test]
    fn removing_last_value_reverts_to_unconstrained() {
        let mut filter = FilterState::default();
        assert!(filter.toggle(FacetValue::Location("Kigali".into()), true));
        assert!(filter.location.is_some());
        assert!(filter.toggle(FacetValue::Location("Kigali".into()), false));
        assert_eq!(filter.location, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn toggle_reports_unchanged_state() {
        let mut filter = FilterState::default().with(FacetValue::JobType(JobType::FullTime));
        assert!(!filter.toggle(FacetValue::JobType(JobType::FullTime), true));
        assert!(!filter.toggle(FacetValue::JobType(JobType::Volunteer), false));
        assert!(!FilterState::default().toggle(FacetValue::Location("Huye".into()), false));
    }

    #[test]
    fn facet_value_parsing_accepts_known_values() {
        let v = FacetValue::parse(Facet::JobType, " full-time ").unwrap();
        assert_eq!(v, FacetValue::JobType(JobType::FullTime));
        assert!(FacetValue::parse(Facet::JobType, "contract").is_err());
        assert!(FacetValue::parse(Facet::LocationType, "unknown").is_err());
        assert!(FacetValue::parse(Facet::Location, "  ").is_err());
    }
}
