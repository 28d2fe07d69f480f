//! Document ID conventions used by the CMS:
//! - Published: `{id}`
//! - Draft: `drafts.{id}`
//! - Version: `versions.{releaseId}.{id}`

use uuid::Uuid;

const DRAFT_PREFIX: &str = "drafts.";
const VERSION_PREFIX: &str = "versions.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentIdKind {
    Published(String),
    Draft(String),
    Version { release_id: String, base_id: String },
}

impl DocumentIdKind {
    /// Classify a document ID by its prefix.
    pub fn parse(id: &str) -> Self {
        if let Some(base) = id.strip_prefix(DRAFT_PREFIX) {
            return DocumentIdKind::Draft(base.to_string());
        }
        match id
            .strip_prefix(VERSION_PREFIX)
            .and_then(|rest| rest.split_once('.'))
        {
            Some((release_id, base_id)) => DocumentIdKind::Version {
                release_id: release_id.to_string(),
                base_id: base_id.to_string(),
            },
            // A bare `versions.` prefix without a release is not a version id
            None => DocumentIdKind::Published(id.to_string()),
        }
    }

    /// Fresh published ID for a document created by this service.
    pub fn generate() -> Self {
        DocumentIdKind::Published(Uuid::new_v4().to_string())
    }

    /// The ID of the published document this ID refers to.
    pub fn base_id(&self) -> &str {
        match self {
            DocumentIdKind::Published(id) | DocumentIdKind::Draft(id) => id,
            DocumentIdKind::Version { base_id, .. } => base_id,
        }
    }

    /// Short label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentIdKind::Published(_) => "published",
            DocumentIdKind::Draft(_) => "draft",
            DocumentIdKind::Version { .. } => "version",
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, DocumentIdKind::Draft(_))
    }
}
