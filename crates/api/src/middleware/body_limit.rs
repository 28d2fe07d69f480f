use tower_http::limit::RequestBodyLimitLayer;

/// Cap request bodies; oversized form or webhook posts get 413.
pub fn body_limit_layer(max_bytes: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(max_bytes)
}
