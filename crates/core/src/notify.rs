use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

/// A transactional email ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email request failed: {0}")]
    Request(String),
    #[error("email provider returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Outbound email delivery.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    fn provider_tag(&self) -> &'static str;

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Send a notification whose failure must not affect the caller's outcome.
/// Returns whether the message was accepted by the provider.
pub async fn notify_best_effort(notifier: &dyn Notifier, message: &EmailMessage) -> bool {
    match notifier.send(message).await {
        Ok(()) => {
            tracing::debug!(
                provider = notifier.provider_tag(),
                subject = %message.subject,
                "notification sent"
            );
            true
        }
        Err(e) => {
            tracing::warn!(
                provider = notifier.provider_tag(),
                subject = %message.subject,
                error = %e,
                "notification failed"
            );
            false
        }
    }
}

/// Used when no email provider is configured.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    fn provider_tag(&self) -> &'static str {
        "disabled"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        tracing::info!(subject = %message.subject, "email disabled, dropping notification");
        Ok(())
    }
}

/// Keeps every message in memory; can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<EmailMessage>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn provider_tag(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Upstream {
                status: 503,
                message: "provider unavailable".into(),
            });
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            to: vec!["team@example.com".into()],
            subject: "Hello".into(),
            html: "<p>Hello</p>".into(),
            text: "Hello".into(),
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn best_effort_reports_delivery() {
        let notifier = RecordingNotifier::new();
        assert!(notify_best_effort(&notifier, &message()).await);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn best_effort_swallows_failure() {
        let notifier = RecordingNotifier::failing();
        assert!(!notify_best_effort(&notifier, &message()).await);
        assert!(notifier.sent().is_empty());
    }
}
