use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use brochure_core::events::types::{RevalidatedEvent, SiteEvent};
use brochure_core::revalidate::{apply_plan, RevalidationEvent};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::broadcast::error::RecvError;

use crate::config::AppConfig;
use crate::error::{parse_json, ApiError, ApiResult};
use crate::state::AppState;

pub const SECRET_HEADER: &str = "x-sanity-webhook-secret";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/revalidate", get(status).post(revalidate))
        .route("/api/revalidate/events", get(events))
}

/// Liveness check used when configuring the webhook.
async fn status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Revalidation webhook is active",
    }))
}

/// Compare without short-circuiting on the first differing byte.
fn secrets_match(provided: &[u8], expected: &[u8]) -> bool {
    provided.len() == expected.len()
        && provided
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn authorize(config: &AppConfig, headers: &HeaderMap) -> ApiResult<()> {
    match config.webhook_secret.as_deref() {
        Some(expected) => {
            let provided = headers.get(SECRET_HEADER).map(|v| v.as_bytes());
            if !provided.is_some_and(|p| secrets_match(p, expected.as_bytes())) {
                tracing::warn!(
                    header_present = provided.is_some(),
                    "revalidation webhook rejected: invalid secret"
                );
                return Err(ApiError::Unauthorized("Invalid secret".into()));
            }
            Ok(())
        }
        None if config.require_webhook_secret => {
            tracing::error!("revalidation webhook rejected: SANITY_WEBHOOK_SECRET is not set");
            Err(ApiError::Unauthorized("Webhook secret is not configured".into()))
        }
        None => {
            tracing::warn!("accepting unauthenticated revalidation webhook");
            Ok(())
        }
    }
}

async fn revalidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    authorize(state.config(), &headers)?;

    let event: RevalidationEvent = parse_json(&body)?;
    let plan = event.plan();
    let id_kind = event.id_kind();
    tracing::info!(
        content_type = event.content_type.as_deref().unwrap_or("<none>"),
        document_id = id_kind.as_ref().map(|k| k.base_id()).unwrap_or("<none>"),
        id_kind = id_kind.as_ref().map(|k| k.label()).unwrap_or("<none>"),
        tags = plan.tags.len(),
        paths = plan.paths.len(),
        "revalidating"
    );

    apply_plan(state.revalidator(), &plan)
        .await
        .map_err(|e| ApiError::upstream("Error revalidating", e))?;

    state
        .event_bus()
        .publish(SiteEvent::Revalidated(RevalidatedEvent {
            content_type: event.content_type.clone(),
            document_id: event.document_id.clone(),
            tags: plan.tags.clone(),
            paths: plan.paths.clone(),
            timestamp: Utc::now(),
        }));

    Ok(Json(json!({
        "success": true,
        "revalidated": true,
        "now": Utc::now().timestamp_millis(),
        "contentType": event.content_type,
        "tags": plan.tags,
        "paths": plan.paths,
    })))
}

fn sse_event(event: &SiteEvent) -> Event {
    Event::default()
        .event(event.name())
        .json_data(event)
        .unwrap_or_else(|_| Event::default().event(event.name()))
}

/// Server-sent stream of invalidations for downstream caches.
async fn events(State(state): State<AppState>) -> Response {
    let mut rx = state.event_bus().subscribe();
    let stream = async_stream::stream! {
        yield Ok::<_, Infallible>(sse_event(&SiteEvent::Welcome));
        loop {
            match rx.recv().await {
                Ok(event) => yield Ok(sse_event(&event)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event listener lagged");
                    yield Ok(sse_event(&SiteEvent::Reconnect));
                }
                Err(RecvError::Closed) => break,
            }
        }
    };
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
