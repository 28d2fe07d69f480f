pub mod contact;
pub mod health;
pub mod newsletter;
pub mod pages;
pub mod revalidate;
pub mod webinars;

use axum::Router;

use crate::middleware::body_limit::body_limit_layer;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config().body_limit_bytes;
    Router::new()
        .merge(health::routes())
        .merge(revalidate::routes())
        .merge(contact::routes())
        .merge(newsletter::routes())
        .merge(webinars::routes())
        .merge(pages::routes())
        .fallback(pages::not_found)
        .layer(body_limit_layer(body_limit))
        .with_state(state)
}
