use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic CMS document envelope. Type-specific fields are kept in `fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A slug as delivered by the CMS: either the slug object `{ "current": .. }`
/// or an already-projected string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slug {
    Plain(String),
    Object { current: String },
}

impl Slug {
    pub fn as_str(&self) -> &str {
        match self {
            Slug::Plain(s) => s,
            Slug::Object { current } => current,
        }
    }

    /// `None` for an empty or whitespace-only slug.
    pub fn non_empty(&self) -> Option<&str> {
        let s = self.as_str().trim();
        (!s.is_empty()).then_some(s)
    }
}
