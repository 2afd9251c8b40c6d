// Search, facet filtering and load-more pagination over a job collection.

pub mod engine;
pub mod facets;
pub mod filter;
pub mod pagination;
pub mod projector;

pub use engine::{ResultSummary, SearchEngine};
pub use facets::{FacetOptions, build_location_facets};
pub use filter::{Facet, FacetValue, FilterState, matches};
pub use pagination::{Pagination, window};
pub use projector::project;
