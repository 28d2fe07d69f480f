use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use brochure_core::forms::newsletter::{self, NewsletterRequest};
use brochure_core::notify::notify_best_effort;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::{parse_json, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/newsletter", post(subscribe))
}

async fn subscribe(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let request: NewsletterRequest = parse_json(&body)?;
    let outcome = newsletter::subscribe(state.content(), &request, Utc::now()).await?;

    notify_best_effort(
        state.notifier(),
        &newsletter::welcome_email(&outcome, &state.config().site_name),
    )
    .await;

    let body = if outcome.is_reactivated() {
        json!({
            "success": true,
            "message": "Welcome back! Your subscription has been reactivated.",
            "reactivated": true,
        })
    } else {
        json!({
            "success": true,
            "message": "Successfully subscribed to the newsletter.",
        })
    };
    Ok(Json(body))
}
