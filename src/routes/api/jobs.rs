use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::job::JobRecord;
use crate::routes::AppState;
use crate::search::filter::{Facet, FacetValue, FilterState};
use crate::search::pagination::Pagination;
use crate::search::projector::project;

/// Facet values are comma-separated, e.g. `job_type=full-time,internship`.
#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    pub search: Option<String>,
    pub job_type: Option<String>,
    pub location_type: Option<String>,
    pub location: Option<String>,
    pub page: Option<usize>,
}

impl JobQuery {
    pub fn filter(&self) -> Result<FilterState, AppError> {
        let mut filter = FilterState::default();
        if let Some(search) = &self.search {
            filter.set_search(search);
        }
        let facets = [
            (Facet::JobType, &self.job_type),
            (Facet::LocationType, &self.location_type),
            (Facet::Location, &self.location),
        ];
        for (facet, raw) in facets {
            for value in raw.iter().flat_map(|s| s.split(',')) {
                if value.trim().is_empty() {
                    continue;
                }
                filter.toggle(FacetValue::parse(facet, value)?, true);
            }
        }
        Ok(filter)
    }
}

#[derive(Debug, Serialize)]
pub struct JobPage {
    pub jobs: Vec<JobRecord>,
    pub total: usize,
    pub visible: usize,
    pub has_more: bool,
    pub page: usize,
}

/// GET /api/v1/jobs
///
/// Filters the current catalog and returns the first `page` pages of
/// matches. Incrementing `page` is the load-more action.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<JobPage>, AppError> {
    let filter = query.filter()?;
    let pagination = Pagination::at_page(state.page_size, query.page.unwrap_or(1));

    let jobs = state.catalog.jobs().await;
    let filtered = project(&jobs, &filter);
    let visible: Vec<JobRecord> = pagination
        .window(&filtered)
        .iter()
        .map(|&job| job.clone())
        .collect();

    Ok(Json(JobPage {
        total: filtered.len(),
        visible: visible.len(),
        has_more: pagination.has_more(filtered.len()),
        page: pagination.page_count(),
        jobs: visible,
    }))
}
