use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::page::PageRequest;
use super::query::DocumentQuery;
use crate::mutation::types::{Mutation, MutationResponse};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content request failed: {0}")]
    Request(String),
    #[error("content API returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("unexpected content payload: {0}")]
    Decode(String),
    #[error("mutation rejected: {0}")]
    Rejected(String),
}

/// Query and mutation access to the headless CMS.
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    /// Short backend name for logs and health output.
    fn backend_tag(&self) -> &'static str;

    async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<Value>, ContentError>;

    async fn fetch_first(&self, query: &DocumentQuery) -> Result<Option<Value>, ContentError>;

    /// One window of results plus the total number of matches.
    async fn fetch_page(
        &self,
        query: &DocumentQuery,
        page: &PageRequest,
    ) -> Result<(Vec<Value>, u64), ContentError>;

    /// Apply the mutations as one transaction.
    async fn mutate(&self, mutations: Vec<Mutation>) -> Result<MutationResponse, ContentError>;
}
