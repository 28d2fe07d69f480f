use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use brochure_core::forms::contact::{self, ContactForm};
use brochure_core::notify::notify_best_effort;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::{parse_json, ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/contact", post(submit))
}

async fn submit(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let body: Value = parse_json(&body)?;
    let form = ContactForm::from_json(&body)?;

    let id = contact::submit(state.content(), &form, Utc::now())
        .await
        .map_err(|e| ApiError::upstream("Failed to submit contact form", e))?;
    tracing::info!(submission_id = %id, service = %form.service_interested, "contact form submitted");

    match state.config().contact_email_to.as_deref() {
        Some(recipient) => {
            notify_best_effort(state.notifier(), &contact::notification_email(&form, recipient))
                .await;
        }
        None => tracing::debug!("no contact recipient configured, skipping notification"),
    }

    Ok(Json(json!({
        "success": true,
        "message": "Thank you for reaching out. We will get back to you shortly.",
        "id": id,
    })))
}
