use async_trait::async_trait;
use brochure_core::content::{ContentError, ContentStore, DocumentQuery, PageRequest};
use brochure_core::mutation::types::{Mutation, MutationRequest, MutationResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{error_message, http_client};

#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    /// Date-based API version, e.g. `2024-01-01`.
    pub api_version: String,
    pub token: Option<String>,
    /// Read through the CDN. Ignored for authenticated reads.
    pub use_cdn: bool,
}

impl SanityConfig {
    fn host(&self, for_read: bool) -> String {
        let api = if for_read && self.use_cdn && self.token.is_none() {
            "apicdn"
        } else {
            "api"
        };
        format!("https://{}.{api}.sanity.io", self.project_id)
    }

    pub fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.host(true),
            self.api_version,
            self.dataset
        )
    }

    pub fn mutate_url(&self) -> String {
        format!(
            "{}/v{}/data/mutate/{}",
            self.host(false),
            self.api_version,
            self.dataset
        )
    }
}

/// Query-string pairs: the GROQ text plus one `$name` entry per parameter,
/// each JSON-encoded.
fn query_pairs(groq: &str, params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = vec![("query".to_string(), groq.to_string())];
    for (name, value) in params {
        pairs.push((format!("${name}"), value.to_string()));
    }
    pairs
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
struct PageResult {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    total: u64,
}

/// Sanity HTTP API client.
pub struct SanityClient {
    http: reqwest::Client,
    config: SanityConfig,
}

impl SanityClient {
    pub fn new(config: SanityConfig) -> Result<Self, ContentError> {
        let http = http_client().map_err(|e| ContentError::Request(e.to_string()))?;
        Ok(Self { http, config })
    }

    async fn query(&self, groq: &str, params: &Map<String, Value>) -> Result<Value, ContentError> {
        let mut request = self
            .http
            .get(self.config.query_url())
            .query(&query_pairs(groq, params));
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response).await;
            tracing::error!(status, %message, "content query failed");
            return Err(ContentError::Upstream { status, message });
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))?;
        Ok(body.result)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    fn backend_tag(&self) -> &'static str {
        "sanity"
    }

    async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<Value>, ContentError> {
        match self.query(&query.list_groq(), &query.params()).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ContentError::Decode(format!("expected array, got {other}"))),
        }
    }

    async fn fetch_first(&self, query: &DocumentQuery) -> Result<Option<Value>, ContentError> {
        match self.query(&query.first_groq(), &query.params()).await? {
            Value::Null => Ok(None),
            doc => Ok(Some(doc)),
        }
    }

    async fn fetch_page(
        &self,
        query: &DocumentQuery,
        page: &PageRequest,
    ) -> Result<(Vec<Value>, u64), ContentError> {
        let mut params = query.params();
        params.insert("offset".into(), page.offset().into());
        params.insert("end".into(), page.end().into());
        let result: PageResult = serde_json::from_value(self.query(&query.page_groq(), &params).await?)
            .map_err(|e| ContentError::Decode(e.to_string()))?;
        Ok((result.items, result.total))
    }

    async fn mutate(&self, mutations: Vec<Mutation>) -> Result<MutationResponse, ContentError> {
        let token = self
            .config
            .token
            .as_deref()
            .ok_or_else(|| ContentError::Rejected("no write token configured".into()))?;
        let response = self
            .http
            .post(self.config.mutate_url())
            .query(&[("returnIds", "true")])
            .bearer_auth(token)
            .json(&MutationRequest { mutations })
            .send()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response).await;
            tracing::error!(status, %message, "content mutation failed");
            return Err(ContentError::Upstream { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))
    }
}
