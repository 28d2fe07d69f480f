use std::fmt::Display;

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brochure_core::content::PageError;
use brochure_core::document::validate::ValidationError;
use brochure_core::forms::newsletter::NewsletterError;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Handler error, rendered as `{success: false, error, ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// A collaborator (CMS, cache, email provider) failed. The detail is
    /// returned to the caller.
    #[error("{message}: {detail}")]
    Upstream { message: String, detail: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn upstream(message: &str, err: impl Display) -> Self {
        ApiError::Upstream {
            message: message.to_string(),
            detail: err.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<NewsletterError> for ApiError {
    fn from(err: NewsletterError) -> Self {
        match err {
            NewsletterError::Validation(e) => e.into(),
            NewsletterError::AlreadySubscribed => {
                ApiError::Conflict(NewsletterError::AlreadySubscribed.to_string())
            }
            NewsletterError::Content(e) => ApiError::upstream("Failed to subscribe", e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "notFound"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "badRequest"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Upstream { .. } | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internalError")
            }
        };

        let body = match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg) => json!({
                "success": false,
                "error": msg,
                "type": error_type,
                "statusCode": status.as_u16(),
            }),
            ApiError::Upstream { message, detail } => {
                tracing::error!(%detail, "{message}");
                json!({
                    "success": false,
                    "message": message,
                    "error": detail,
                    "type": error_type,
                    "statusCode": status.as_u16(),
                })
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                json!({
                    "success": false,
                    "error": "An internal error occurred",
                    "type": error_type,
                    "statusCode": status.as_u16(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Decode a JSON request body, reporting malformed input as a 400 envelope.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn conflict_envelope() {
        let (status, body) = render(NewsletterError::AlreadySubscribed.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "This email is already subscribed");
    }

    #[tokio::test]
    async fn upstream_keeps_detail() {
        let (status, body) = render(ApiError::upstream("Error revalidating", "cache down")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error revalidating");
        assert_eq!(body["error"], "cache down");
    }

    #[tokio::test]
    async fn internal_hides_detail() {
        let (_, body) = render(ApiError::Internal("secret stack".into())).await;
        assert_eq!(body["error"], "An internal error occurred");
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let err = parse_json::<serde_json::Value>(&Bytes::from_static(b"{nope")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
