use async_trait::async_trait;
use brochure_core::revalidate::{InvalidationTarget, RevalidateError, Revalidator};
use serde_json::json;

use crate::{error_message, http_client};

/// Forwards invalidations to the hosting platform's purge endpoint:
/// `{"tags": [..]}` or `{"paths": [..]}`, one target per request.
pub struct HttpPurgeRevalidator {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpPurgeRevalidator {
    pub fn new(endpoint: String, token: Option<String>) -> reqwest::Result<Self> {
        Ok(Self {
            http: http_client()?,
            endpoint,
            token,
        })
    }
}

fn purge_body(target: &InvalidationTarget) -> serde_json::Value {
    match target {
        InvalidationTarget::Tag(tag) => json!({ "tags": [tag] }),
        InvalidationTarget::Path(path) => json!({ "paths": [path] }),
    }
}

#[async_trait]
impl Revalidator for HttpPurgeRevalidator {
    fn backend_tag(&self) -> &'static str {
        "http-purge"
    }

    async fn invalidate(&self, target: &InvalidationTarget) -> Result<(), RevalidateError> {
        let failed = |reason: String| RevalidateError::Failed {
            target: target.clone(),
            reason,
        };

        let mut request = self.http.post(&self.endpoint).json(&purge_body(target));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response).await;
            return Err(failed(format!("{status}: {message}")));
        }
        tracing::debug!(%target, "purged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_per_target_kind() {
        assert_eq!(
            purge_body(&InvalidationTarget::Tag("blog-list".into())),
            json!({"tags": ["blog-list"]})
        );
        assert_eq!(
            purge_body(&InvalidationTarget::Path("/".into())),
            json!({"paths": ["/"]})
        );
    }
}
