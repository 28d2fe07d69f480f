use std::sync::Arc;

use brochure_core::content::ContentStore;
use brochure_core::events::bus::EventBus;
use brochure_core::notify::Notifier;
use brochure_core::revalidate::Revalidator;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    content: Arc<dyn ContentStore>,
    notifier: Arc<dyn Notifier>,
    revalidator: Arc<dyn Revalidator>,
    event_bus: EventBus,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        content: Arc<dyn ContentStore>,
        notifier: Arc<dyn Notifier>,
        revalidator: Arc<dyn Revalidator>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            inner: Arc::new(InnerState {
                config,
                content,
                notifier,
                revalidator,
                event_bus,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn content(&self) -> &dyn ContentStore {
        self.inner.content.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    pub fn revalidator(&self) -> &dyn Revalidator {
        self.inner.revalidator.as_ref()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }
}
