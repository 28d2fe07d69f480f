//! Webhook-driven cache invalidation: which tags and paths a content change
//! makes stale, and the seam to the hosting platform that drops them.

pub mod event;
pub mod kind;
pub mod revalidator;

pub use event::RevalidationEvent;
pub use kind::{ContentKind, RevalidationPlan};
pub use revalidator::{
    apply_plan, InvalidationTarget, LoggingRevalidator, RecordingRevalidator, RevalidateError,
    Revalidator,
};
