use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness plus the wiring this instance runs with. Does not call the CMS.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "content": state.content().backend_tag(),
        "revalidator": state.revalidator().backend_tag(),
        "email": state.notifier().provider_tag(),
        "subscribers": state.event_bus().subscriber_count(),
    }))
}
