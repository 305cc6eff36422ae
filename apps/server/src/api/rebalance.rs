use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use showcase_core::rebalance::RebalanceSummary;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Run a rebalance for one organization and return its summary.
async fn rebalance_organization(
    Path(org_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RebalanceSummary>> {
    if org_id.trim().is_empty() {
        return Err(ApiError::BadRequest("org_id must not be empty".to_string()));
    }
    let report = state.rebalance_service.rebalance_report(&org_id).await?;
    Ok(Json(report.summary()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/organizations/{org_id}/rebalance",
        post(rebalance_organization),
    )
}
