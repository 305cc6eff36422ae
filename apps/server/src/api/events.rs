use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use showcase_core::events::DomainEvent;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Queue a domain event for debounced rebalancing.
async fn publish_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DomainEvent>,
) -> ApiResult<StatusCode> {
    if event.org_id().trim().is_empty() {
        return Err(ApiError::BadRequest("org_id must not be empty".to_string()));
    }
    tracing::debug!("Queued domain event for org {}", event.org_id());
    state.domain_event_sink.emit(event);
    Ok(StatusCode::ACCEPTED)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/events", post(publish_event))
}
