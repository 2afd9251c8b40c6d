//! Stateful search session over one job collection.
//!
//! The engine owns the source collection, the applied [`FilterState`], the
//! pending search input and the load-more [`Pagination`]. Every mutator
//! recomputes the filtered set synchronously and publishes a
//! [`ResultSummary`] to subscribers. Filter changes reset pagination to the
//! first page; replacing the collection (a data refresh) does not.

use serde::Serialize;
use tokio::sync::watch;

use crate::models::job::JobRecord;
use crate::search::facets::{FacetOptions, build_location_facets};
use crate::search::filter::{FacetValue, FilterState, matches};
use crate::search::pagination::Pagination;
use crate::source::{FetchStamp, LatestWins};

/// What a view needs to redraw its counters and load-more button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub total: usize,
    pub filtered: usize,
    pub visible: usize,
    pub page_count: usize,
    pub has_more: bool,
}

pub struct SearchEngine {
    jobs: Vec<JobRecord>,
    filter: FilterState,
    search_input: String,
    pagination: Pagination,
    filtered: Vec<usize>,
    locations: Vec<String>,
    sequence: LatestWins,
    summary: watch::Sender<ResultSummary>,
}

impl SearchEngine {
    pub fn new(page_size: usize) -> Self {
        let (summary, _) = watch::channel(ResultSummary::default());
        let mut engine = Self {
            jobs: Vec::new(),
            filter: FilterState::default(),
            search_input: String::new(),
            pagination: Pagination::new(page_size),
            filtered: Vec::new(),
            locations: Vec::new(),
            sequence: LatestWins::default(),
            summary,
        };
        engine.publish();
        engine
    }

    pub fn with_jobs(page_size: usize, jobs: Vec<JobRecord>) -> Self {
        let mut engine = Self::new(page_size);
        engine.replace_jobs(jobs);
        engine
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultSummary> {
        self.summary.subscribe()
    }

    pub fn summary(&self) -> ResultSummary {
        *self.summary.borrow()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn filtered_jobs(&self) -> Vec<&JobRecord> {
        self.filtered.iter().map(|&i| &self.jobs[i]).collect()
    }

    pub fn visible_jobs(&self) -> Vec<&JobRecord> {
        self.pagination
            .window(&self.filtered)
            .iter()
            .map(|&i| &self.jobs[i])
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more(self.filtered.len())
    }

    /// Canonical locations available in the current collection.
    pub fn location_facets(&self) -> &[String] {
        &self.locations
    }

    /// Filter panel options, with the active selections marked.
    pub fn facet_options(&self) -> FacetOptions {
        FacetOptions::new(self.location_facets(), &self.filter)
    }

    // Source collection

    /// Replace the collection. Keeps the filter and the page position.
    pub fn replace_jobs(&mut self, jobs: Vec<JobRecord>) {
        self.jobs = jobs;
        self.locations = build_location_facets(&self.jobs);
        self.recompute();
    }

    pub fn begin_fetch(&mut self) -> FetchStamp {
        self.sequence.issue()
    }

    /// Apply a fetch result unless a newer one was already applied.
    pub fn complete_fetch(&mut self, stamp: FetchStamp, jobs: Vec<JobRecord>) -> bool {
        if !self.sequence.accept(stamp) {
            tracing::debug!("Ignoring stale job fetch {stamp:?}");
            return false;
        }
        self.replace_jobs(jobs);
        true
    }

    // Filter transitions

    /// Update the pending search input. Nothing is filtered until
    /// [`submit_search`](Self::submit_search).
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_input = term.into();
    }

    pub fn submit_search(&mut self) {
        self.filter.set_search(&self.search_input);
        self.pagination.reset();
        self.recompute();
    }

    pub fn toggle_facet_value(&mut self, value: FacetValue, checked: bool) {
        if self.filter.toggle(value, checked) {
            self.pagination.reset();
            self.recompute();
        }
    }

    pub fn clear_all(&mut self) {
        self.filter = FilterState::default();
        self.search_input.clear();
        self.pagination.reset();
        self.recompute();
    }

    // Pagination

    pub fn load_more(&mut self) -> bool {
        let grew = self.pagination.load_more(self.filtered.len());
        if grew {
            self.publish();
        }
        grew
    }

    fn recompute(&mut self) {
        self.filtered = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| matches(job, &self.filter))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            "Filtered {} of {} jobs (page {})",
            self.filtered.len(),
            self.jobs.len(),
            self.pagination.page_count()
        );
        self.publish();
    }

    fn publish(&mut self) {
        let filtered = self.filtered.len();
        self.summary.send_replace(ResultSummary {
            total: self.jobs.len(),
            filtered,
            visible: self.pagination.visible_len(filtered),
            page_count: self.pagination.page_count(),
            has_more: self.pagination.has_more(filtered),
        });
    }
}
