//! Domain layer for the brochure site backend: CMS documents and typed
//! content, form workflows, the revalidation dispatch table, and the
//! collaborator traits the HTTP layer is wired against.

pub mod content;
pub mod document;
pub mod events;
pub mod forms;
pub mod mutation;
pub mod notify;
pub mod revalidate;
