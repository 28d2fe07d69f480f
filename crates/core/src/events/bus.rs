use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::SiteEvent;

/// In-process event bus backed by `tokio::broadcast`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<SiteEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish to current subscribers. Returns how many received it; having
    /// no subscribers is not an error.
    pub fn publish(&self, event: SiteEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::RevalidatedEvent;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(SiteEvent::Welcome), 1);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, SiteEvent::Welcome));
    }

    #[tokio::test]
    async fn publish_without_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(SiteEvent::Reconnect), 0);
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(SiteEvent::Revalidated(RevalidatedEvent {
            content_type: Some("hero".into()),
            document_id: None,
            tags: vec!["hero-slides".into()],
            paths: vec!["/".into()],
            timestamp: chrono::Utc::now(),
        }));

        assert!(matches!(rx1.recv().await.unwrap(), SiteEvent::Revalidated(_)));
        assert!(matches!(rx2.recv().await.unwrap(), SiteEvent::Revalidated(e) if e.tags == ["hero-slides"]));
    }
}
