//! Job routes

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use super::catalog::JobCatalog;
use super::queries::{list_jobs::handle as handle_list_jobs, ListJobsQuery, ListJobsResponse};
use crate::error::ApiResult;

/// Create job routes
pub fn jobs_routes() -> Router<JobCatalog> {
    Router::new().route("/jobs", get(list_jobs))
}

/// List jobs
///
/// GET /jobs?view_all=false&user_id=alice@x.com
async fn list_jobs(
    State(catalog): State<JobCatalog>,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Json<ListJobsResponse>> {
    let response = handle_list_jobs(&catalog, query).inspect_err(|e| {
        tracing::error!("Failed to list jobs: {}", e);
    })?;

    Ok(Json(response))
}
