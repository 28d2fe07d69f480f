use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events streamed to invalidation listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SiteEvent {
    Welcome,
    Revalidated(RevalidatedEvent),
    /// The listener fell behind and should resynchronise.
    Reconnect,
}

impl SiteEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            SiteEvent::Welcome => "welcome",
            SiteEvent::Revalidated(_) => "revalidated",
            SiteEvent::Reconnect => "reconnect",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidatedEvent {
    pub content_type: Option<String>,
    pub document_id: Option<String>,
    pub tags: Vec<String>,
    pub paths: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
