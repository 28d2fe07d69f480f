use axum::http::{header::CONTENT_TYPE, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::routes::revalidate::SECRET_HEADER;

/// Forms may be posted from any origin serving the site; only the methods
/// and headers the API uses are allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(SECRET_HEADER)])
}
