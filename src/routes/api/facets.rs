use axum::Json;
use axum::extract::{Query, State};

use crate::error::AppError;
use crate::routes::AppState;
use crate::routes::api::jobs::JobQuery;
use crate::search::facets::FacetOptions;

/// GET /api/v1/facets
///
/// Accepts the same filter parameters as `/api/v1/jobs` so the options the
/// caller has already chosen come back marked `selected`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<FacetOptions>, AppError> {
    let filter = query.filter()?;
    let jobs = state.catalog.jobs().await;
    Ok(Json(FacetOptions::from_jobs(&jobs, &filter)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::models::job::fixtures::*;
    use crate::models::job::{JobType, LocationType};
    use crate::routes::AppState;
    use crate::routes::api::router;
    use crate::source::refresh::Catalog;

    #[tokio::test]
    async fn lists_locations_from_catalog() {
        let catalog = Catalog::new();
        let stamp = catalog.begin_fetch().await;
        catalog
            .complete_fetch(
                stamp,
                vec![
                    at(job("a", JobType::FullTime, LocationType::Remote), Some("Kigali, Rwanda")),
                    at(job("b", JobType::FullTime, LocationType::Remote), Some("Huye")),
                    at(job("c", JobType::FullTime, LocationType::Remote), None),
                ],
            )
            .await;
        let app = router(AppState {
            catalog,
            page_size: 10,
        });

        let resp = app
            .oneshot(
                Request::get("/api/v1/facets?location=Huye&job_type=volunteer")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["locations"][0]["value"], "Huye");
        assert_eq!(body["locations"][0]["selected"], true);
        assert_eq!(body["locations"][1]["value"], "Kigali");
        assert_eq!(body["locations"][1]["selected"], false);
        assert_eq!(body["job_types"][1]["value"], "part-time");
        assert_eq!(body["job_types"][3]["selected"], true);
        assert_eq!(body["location_types"][0]["label"], "Remote");
    }
}
