use serde::{Deserialize, Serialize};

use super::kind::RevalidationPlan;
use crate::document::id::DocumentIdKind;
use crate::document::model::Slug;

/// Change notification posted by the CMS webhook: `{_type, slug, _id}`.
///
/// Every field is optional on the wire; a body without `_type` still
/// refreshes the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidationEvent {
    #[serde(rename = "_type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(rename = "_id", default)]
    pub document_id: Option<String>,
}

impl RevalidationEvent {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().and_then(Slug::non_empty)
    }

    pub fn id_kind(&self) -> Option<DocumentIdKind> {
        self.document_id.as_deref().map(DocumentIdKind::parse)
    }

    pub fn plan(&self) -> RevalidationPlan {
        RevalidationPlan::for_type(self.content_type.as_deref(), self.slug())
    }
}
