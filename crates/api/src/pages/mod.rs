//! Server-rendered HTML pages.
//!
//! Renderers are pure functions from typed content to markup; the handlers
//! in `routes::pages` fetch the content and wrap the result in a
//! [`CachedPage`] that tells the hosting cache how long to keep it and which
//! tags purge it.

pub mod about;
pub mod blog;
pub mod home;
pub mod layout;
pub mod services;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use brochure_core::content::ContentError;
use maud::Markup;

pub const CACHE_TAG_HEADER: &str = "cache-tag";

/// A rendered page plus its cache metadata.
#[derive(Debug)]
pub struct CachedPage {
    status: StatusCode,
    markup: Markup,
    tags: Vec<String>,
    max_age: u64,
}

impl CachedPage {
    pub fn new(markup: Markup, tags: Vec<String>, max_age: u64) -> Self {
        Self {
            status: StatusCode::OK,
            markup,
            tags,
            max_age,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for CachedPage {
    fn into_response(self) -> Response {
        let mut response = (self.status, Html(self.markup.into_string())).into_response();
        let headers = response.headers_mut();
        let cache_control = format!(
            "public, s-maxage={}, stale-while-revalidate",
            self.max_age
        );
        if let Ok(value) = HeaderValue::from_str(&cache_control) {
            headers.insert(header::CACHE_CONTROL, value);
        }
        if !self.tags.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&self.tags.join(",")) {
                headers.insert(CACHE_TAG_HEADER, value);
            }
        }
        response
    }
}

/// The CMS could not be reached while rendering; never cached.
#[derive(Debug)]
pub struct PageFailure(pub ContentError);

impl From<ContentError> for PageFailure {
    fn from(err: ContentError) -> Self {
        PageFailure(err)
    }
}

impl IntoResponse for PageFailure {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "page render failed");
        let mut response = (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(layout::error_page().into_string()),
        )
            .into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}
