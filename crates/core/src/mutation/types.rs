//! Mutation payloads for the CMS mutate endpoint.
//!
//! `{"mutations": [{"create": {...}}, {"patch": {"id": .., "set": {..}}}]}`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutation {
    /// Create a new document; fails if `_id` already exists.
    Create(Value),
    Patch(PatchMutation),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchMutation {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_revision_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unset: Option<Vec<String>>,
}

impl PatchMutation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set
            .get_or_insert_with(Map::new)
            .insert(field.to_string(), value.into());
        self
    }

    pub fn unset(mut self, field: &str) -> Self {
        self.unset.get_or_insert_with(Vec::new).push(field.to_string());
        self
    }
}

/// Request body for the mutate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationRequest {
    pub mutations: Vec<Mutation>,
}

/// Result of a mutation transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub transaction_id: String,
    #[serde(default)]
    pub results: Vec<MutationResult>,
}

impl MutationResponse {
    /// ID of the first affected document.
    pub fn first_id(&self) -> Option<&str> {
        self.results.first().map(|r| r.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResult {
    pub id: String,
    #[serde(default)]
    pub operation: Option<String>,
}
