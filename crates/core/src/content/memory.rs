use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use super::page::PageRequest;
use super::query::DocumentQuery;
use super::store::{ContentError, ContentStore};
use crate::document::id::DocumentIdKind;
use crate::document::model::ContentDocument;
use crate::mutation::types::{Mutation, MutationResponse, MutationResult, PatchMutation};

/// In-process content store for local development and tests.
///
/// Documents are held already projected: queries apply their filter and
/// order but ignore the projection.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    documents: RwLock<Vec<Value>>,
    unavailable: AtomicBool,
    transactions: AtomicU64,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Value>) -> Self {
        Self {
            documents: RwLock::new(documents),
            ..Self::default()
        }
    }

    /// Load a JSON array of documents. Every entry must carry `_id` and
    /// `_type`.
    pub fn from_seed(json: &str) -> Result<Self, ContentError> {
        let documents: Vec<ContentDocument> =
            serde_json::from_str(json).map_err(|e| ContentError::Decode(format!("seed: {e}")))?;
        let documents = documents
            .into_iter()
            .map(|doc| serde_json::to_value(doc).map_err(|e| ContentError::Decode(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_documents(documents))
    }

    /// Make every subsequent call fail, simulating a CMS outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of every stored document of the given type.
    pub async fn documents_of_type(&self, doc_type: &str) -> Vec<Value> {
        let query = DocumentQuery::of_type(doc_type);
        self.documents
            .read()
            .await
            .iter()
            .filter(|doc| query.matches(doc))
            .cloned()
            .collect()
    }

    fn check_available(&self) -> Result<(), ContentError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ContentError::Request("content store unavailable".into()));
        }
        Ok(())
    }

    async fn select(&self, query: &DocumentQuery) -> Vec<Value> {
        let docs = self.documents.read().await;
        let mut matched: Vec<Value> = docs.iter().filter(|d| query.matches(d)).cloned().collect();
        matched.sort_by(|a, b| query.compare(a, b));
        matched
    }
}

fn apply_patch(docs: &mut [Value], patch: &PatchMutation) -> Result<(), ContentError> {
    let doc = docs
        .iter_mut()
        .find(|d| d.get("_id").and_then(Value::as_str) == Some(patch.id.as_str()))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ContentError::Rejected(format!("document not found: {}", patch.id)))?;
    if let Some(set) = &patch.set {
        for (key, value) in set {
            doc.insert(key.clone(), value.clone());
        }
    }
    for key in patch.unset.iter().flatten() {
        doc.remove(key);
    }
    doc.insert("_updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
    Ok(())
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<Value>, ContentError> {
        self.check_available()?;
        let mut matched = self.select(query).await;
        if let Some(n) = query.max_results() {
            matched.truncate(n);
        }
        Ok(matched)
    }

    async fn fetch_first(&self, query: &DocumentQuery) -> Result<Option<Value>, ContentError> {
        self.check_available()?;
        Ok(self.select(query).await.into_iter().next())
    }

    async fn fetch_page(
        &self,
        query: &DocumentQuery,
        page: &PageRequest,
    ) -> Result<(Vec<Value>, u64), ContentError> {
        self.check_available()?;
        let all = self.select(query).await;
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((items, total))
    }

    async fn mutate(&self, mutations: Vec<Mutation>) -> Result<MutationResponse, ContentError> {
        self.check_available()?;
        let mut docs = self.documents.write().await;
        // Work on a copy so a failing mutation leaves the store untouched.
        let mut staged = docs.clone();
        let mut results = Vec::with_capacity(mutations.len());

        for mutation in mutations {
            match mutation {
                Mutation::Create(mut doc) => {
                    let obj = doc
                        .as_object_mut()
                        .ok_or_else(|| ContentError::Rejected("document must be an object".into()))?;
                    let id = match obj.get("_id").and_then(Value::as_str) {
                        Some(id) => id.to_string(),
                        None => DocumentIdKind::generate().base_id().to_string(),
                    };
                    if staged
                        .iter()
                        .any(|d| d.get("_id").and_then(Value::as_str) == Some(id.as_str()))
                    {
                        return Err(ContentError::Rejected(format!("document already exists: {id}")));
                    }
                    obj.insert("_id".into(), Value::String(id.clone()));
                    obj.entry("_createdAt")
                        .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
                    staged.push(doc);
                    results.push(MutationResult {
                        id,
                        operation: Some("create".into()),
                    });
                }
                Mutation::Patch(patch) => {
                    apply_patch(&mut staged, &patch)?;
                    results.push(MutationResult {
                        id: patch.id,
                        operation: Some("update".into()),
                    });
                }
            }
        }

        *docs = staged;
        let tx = self.transactions.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MutationResponse {
            transaction_id: format!("memory-tx-{tx}"),
            results,
        })
    }
}
