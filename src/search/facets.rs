use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::job::{JobRecord, JobType, LocationType};
use crate::search::filter::{FacetValue, FilterState};

/// Distinct canonical locations across `jobs`, ascending.
/// Jobs without a usable location are skipped.
pub fn build_location_facets(jobs: &[JobRecord]) -> Vec<String> {
    jobs.iter()
        .filter_map(JobRecord::canonical_location)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Every selectable option, for populating a filter panel. Options already
/// chosen in the filter are marked `selected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub job_types: Vec<FacetOption>,
    pub location_types: Vec<FacetOption>,
    pub locations: Vec<FacetOption>,
}

impl FacetOptions {
    pub fn from_jobs(jobs: &[JobRecord], filter: &FilterState) -> Self {
        Self::new(&build_location_facets(jobs), filter)
    }

    /// Options over an already-built location index.
    pub fn new(locations: &[String], filter: &FilterState) -> Self {
        let option = |value: FacetValue, raw: &str, label: &str| FacetOption {
            value: raw.to_string(),
            label: label.to_string(),
            selected: filter.is_selected(&value),
        };
        Self {
            job_types: JobType::ALL
                .into_iter()
                .map(|t| option(FacetValue::JobType(t), t.as_str(), t.label()))
                .collect(),
            location_types: LocationType::ALL
                .into_iter()
                .map(|t| option(FacetValue::LocationType(t), t.as_str(), t.label()))
                .collect(),
            locations: locations
                .iter()
                .map(|loc| option(FacetValue::Location(loc.clone()), loc, loc))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::fixtures::*;

    fn located(location: Option<&str>) -> JobRecord {
        at(job("Dev", JobType::FullTime, LocationType::Onsite), location)
    }

    #[test]
    fn deduplicates_canonical_prefix_and_skips_missing() {
        let jobs = vec![
            located(Some("Kigali, Rwanda")),
            located(Some("Kigali, East")),
            located(None),
        ];
        assert_eq!(build_location_facets(&jobs), ["Kigali"]);
    }

    #[test]
    fn sorted_ascending_and_blank_skipped() {
        let jobs = vec![
            located(Some("Musanze, North")),
            located(Some("  ")),
            located(Some("Huye")),
            located(Some(", Rwanda")),
            located(Some("Kigali")),
        ];
        assert_eq!(build_location_facets(&jobs), ["Huye", "Kigali", "Musanze"]);
    }

    #[test]
    fn empty_collection_has_no_facets() {
        assert!(build_location_facets(&[]).is_empty());
    }

    #[test]
    fn options_list_known_enum_values_with_labels() {
        let options =
            FacetOptions::from_jobs(&[located(Some("Kigali, Rwanda"))], &FilterState::default());
        assert_eq!(options.job_types.len(), 4);
        assert_eq!(options.job_types[0].value, "full-time");
        assert_eq!(options.job_types[0].label, "Full Time");
        assert_eq!(options.location_types[1].label, "On-site");
        assert_eq!(options.locations[0].value, "Kigali");
        assert!(options.locations.iter().all(|o| !o.selected));
    }

    #[test]
    fn options_mark_active_selections() {
        let filter = FilterState::default()
            .with(FacetValue::JobType(JobType::Internship))
            .with(FacetValue::Location("Huye".into()));
        let jobs = vec![located(Some("Kigali, Rwanda")), located(Some("Huye, South"))];
        let options = FacetOptions::from_jobs(&jobs, &filter);

        let selected = |opts: &[FacetOption]| -> Vec<String> {
            opts.iter().filter(|o| o.selected).map(|o| o.value.clone()).collect()
        };
        assert_eq!(selected(&options.job_types), ["internship"]);
        assert!(selected(&options.location_types).is_empty());
        assert_eq!(selected(&options.locations), ["Huye"]);
    }
}
