use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use brochure_core::content::catalog;
use brochure_core::content::types::Webinar;
use brochure_core::content::{Page, PageRequest};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/webinars", get(list))
}

/// Raw values; validated by [`PageRequest::parse`] so garbage is a 400 in
/// our envelope rather than an extractor rejection.
#[derive(Debug, Deserialize)]
struct WebinarParams {
    offset: Option<String>,
    limit: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<WebinarParams>,
) -> ApiResult<Json<Page<Webinar>>> {
    let request = PageRequest::parse(params.offset.as_deref(), params.limit.as_deref())?;
    let page = catalog::webinars(state.content(), &request)
        .await
        .map_err(|e| ApiError::upstream("Failed to load webinars", e))?;
    Ok(Json(page))
}
