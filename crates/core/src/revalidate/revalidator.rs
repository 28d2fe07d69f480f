use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::kind::RevalidationPlan;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum InvalidationTarget {
    Tag(String),
    Path(String),
}

impl fmt::Display for InvalidationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidationTarget::Tag(tag) => write!(f, "tag:{tag}"),
            InvalidationTarget::Path(path) => write!(f, "path:{path}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RevalidateError {
    #[error("failed to invalidate {target}: {reason}")]
    Failed {
        target: InvalidationTarget,
        reason: String,
    },
}

/// The hosting platform's cache, seen from this service.
///
/// Invalidating something that is not cached is a no-op, so implementations
/// must tolerate repeats.
#[async_trait]
pub trait Revalidator: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn invalidate(&self, target: &InvalidationTarget) -> Result<(), RevalidateError>;
}

/// Apply a plan in order, stopping at the first failure.
pub async fn apply_plan(
    revalidator: &dyn Revalidator,
    plan: &RevalidationPlan,
) -> Result<(), RevalidateError> {
    let targets = plan
        .tags
        .iter()
        .cloned()
        .map(InvalidationTarget::Tag)
        .chain(plan.paths.iter().cloned().map(InvalidationTarget::Path));
    for target in targets {
        revalidator.invalidate(&target).await?;
    }
    Ok(())
}

/// Logs each invalidation. Used when no purge endpoint is configured.
#[derive(Debug, Default)]
pub struct LoggingRevalidator;

#[async_trait]
impl Revalidator for LoggingRevalidator {
    fn backend_tag(&self) -> &'static str {
        "log"
    }

    async fn invalidate(&self, target: &InvalidationTarget) -> Result<(), RevalidateError> {
        tracing::info!(%target, "invalidated");
        Ok(())
    }
}

/// Records every target it is asked to invalidate.
#[derive(Debug, Default)]
pub struct RecordingRevalidator {
    targets: Mutex<Vec<InvalidationTarget>>,
    fail: AtomicBool,
}

impl RecordingRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn targets(&self) -> Vec<InvalidationTarget> {
        self.targets.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn tags(&self) -> Vec<String> {
        self.targets()
            .into_iter()
            .filter_map(|t| match t {
                InvalidationTarget::Tag(tag) => Some(tag),
                InvalidationTarget::Path(_) => None,
            })
            .collect()
    }

    pub fn paths(&self) -> Vec<String> {
        self.targets()
            .into_iter()
            .filter_map(|t| match t {
                InvalidationTarget::Path(path) => Some(path),
                InvalidationTarget::Tag(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut targets) = self.targets.lock() {
            targets.clear();
        }
    }
}

#[async_trait]
impl Revalidator for RecordingRevalidator {
    fn backend_tag(&self) -> &'static str {
        "recording"
    }

    async fn invalidate(&self, target: &InvalidationTarget) -> Result<(), RevalidateError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RevalidateError::Failed {
                target: target.clone(),
                reason: "cache unavailable".into(),
            });
        }
        if let Ok(mut targets) = self.targets.lock() {
            targets.push(target.clone());
        }
        Ok(())
    }
}
