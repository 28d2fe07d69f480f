use chrono::{DateTime, Utc};
use maud::html;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::content::query::DocumentQuery;
use crate::content::store::{ContentError, ContentStore};
use crate::content::types::doc_type;
use crate::document::id::DocumentIdKind;
use crate::document::validate::{normalize_email, ValidationError};
use crate::mutation::types::{Mutation, PatchMutation};
use crate::notify::EmailMessage;

const DEFAULT_SOURCE: &str = "website";
const STATUS_ACTIVE: &str = "active";
const STATUS_UNSUBSCRIBED: &str = "unsubscribed";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    Subscribed { id: String, email: String },
    /// A previously unsubscribed address was switched back to active.
    Reactivated { id: String, email: String },
}

impl SubscriptionOutcome {
    pub fn email(&self) -> &str {
        match self {
            SubscriptionOutcome::Subscribed { email, .. }
            | SubscriptionOutcome::Reactivated { email, .. } => email,
        }
    }

    pub fn is_reactivated(&self) -> bool {
        matches!(self, SubscriptionOutcome::Reactivated { .. })
    }
}

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("This email is already subscribed")]
    AlreadySubscribed,
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Subscribe an address, reactivating it if it had unsubscribed.
pub async fn subscribe(
    store: &dyn ContentStore,
    request: &NewsletterRequest,
    now: DateTime<Utc>,
) -> Result<SubscriptionOutcome, NewsletterError> {
    let raw = request
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ValidationError::MissingField("email".into()))?;
    let email = normalize_email(raw)?;
    let source = request
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SOURCE);

    let existing = store
        .fetch_first(
            &DocumentQuery::of_type(doc_type::NEWSLETTER_SUBSCRIPTION)
                .where_eq("email", email.as_str())
                .project("{_id, email, status}"),
        )
        .await?;

    if let Some(existing) = existing {
        let id = existing
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| ContentError::Decode("subscription without _id".into()))?;
        let status = existing.get("status").and_then(Value::as_str);
        if status != Some(STATUS_UNSUBSCRIBED) {
            return Err(NewsletterError::AlreadySubscribed);
        }

        // Patch the published document even if the match was a draft.
        let id = DocumentIdKind::parse(id).base_id().to_string();
        store
            .mutate(vec![Mutation::Patch(
                PatchMutation::new(id.clone())
                    .set("status", STATUS_ACTIVE)
                    .set("resubscribedAt", now.to_rfc3339())
                    .set("source", source)
                    .unset("unsubscribedAt"),
            )])
            .await?;
        tracing::info!(subscription_id = %id, "newsletter subscription reactivated");
        return Ok(SubscriptionOutcome::Reactivated { id, email });
    }

    let id = DocumentIdKind::generate().base_id().to_string();
    store
        .mutate(vec![Mutation::Create(json!({
            "_id": id,
            "_type": doc_type::NEWSLETTER_SUBSCRIPTION,
            "email": email,
            "source": source,
            "status": STATUS_ACTIVE,
            "subscribedAt": now.to_rfc3339(),
        }))])
        .await?;
    tracing::info!(subscription_id = %id, "newsletter subscription created");
    Ok(SubscriptionOutcome::Subscribed { id, email })
}

pub fn welcome_email(outcome: &SubscriptionOutcome, site_name: &str) -> EmailMessage {
    let heading = if outcome.is_reactivated() {
        "Welcome back!"
    } else {
        "Thanks for subscribing!"
    };
    let html = html! {
        h2 { (heading) }
        p { "You will now receive the " (site_name) " newsletter at " strong { (outcome.email()) } "." }
        p { "You can unsubscribe at any time using the link in any newsletter." }
    };
    EmailMessage {
        to: vec![outcome.email().to_string()],
        subject: format!("{heading} - {site_name} newsletter"),
        html: html.into_string(),
        text: format!(
            "{heading}\n\nYou will now receive the {site_name} newsletter at {}.\n",
            outcome.email()
        ),
        reply_to: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::memory::MemoryContentStore;

    fn request(email: &str) -> NewsletterRequest {
        NewsletterRequest {
            email: Some(email.to_string()),
            source: None,
        }
    }

    #[tokio::test]
    async fn new_address_subscribes() {
        let store = MemoryContentStore::new();
        let outcome = subscribe(&store, &request("New@Example.com"), Utc::now())
            .await
            .unwrap();
        assert!(!outcome.is_reactivated());
        assert_eq!(outcome.email(), "new@example.com");

        let docs = store.documents_of_type(doc_type::NEWSLETTER_SUBSCRIPTION).await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["status"], "active");
        assert_eq!(docs[0]["source"], "website");
    }

    #[tokio::test]
    async fn active_address_is_duplicate() {
        let store = MemoryContentStore::with_documents(vec![json!({
            "_id": "sub-1", "_type": "newsletterSubscription",
            "email": "dup@example.com", "status": "active"
        })]);
        let err = subscribe(&store, &request("dup@example.com"), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, NewsletterError::AlreadySubscribed));
        assert_eq!(store.documents_of_type(doc_type::NEWSLETTER_SUBSCRIPTION).await.len(), 1);
    }

    #[tokio::test]
    async fn unsubscribed_address_is_reactivated() {
        let store = MemoryContentStore::with_documents(vec![json!({
            "_id": "sub-2", "_type": "newsletterSubscription",
            "email": "back@example.com", "status": "unsubscribed",
            "unsubscribedAt": "2024-01-01T00:00:00Z"
        })]);
        let outcome = subscribe(&store, &request("back@example.com"), Utc::now())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SubscriptionOutcome::Reactivated {
                id: "sub-2".into(),
                email: "back@example.com".into()
            }
        );
        let docs = store.documents_of_type(doc_type::NEWSLETTER_SUBSCRIPTION).await;
        assert_eq!(docs[0]["status"], "active");
        assert!(docs[0].get("unsubscribedAt").is_none());
        assert!(docs[0].get("resubscribedAt").is_some());
    }

    #[tokio::test]
    async fn missing_email_is_validation_error() {
        let store = MemoryContentStore::new();
        let err = subscribe(&store, &NewsletterRequest::default(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NewsletterError::Validation(ValidationError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn store_failure_surfaces() {
        let store = MemoryContentStore::new();
        store.set_unavailable(true);
        let err = subscribe(&store, &request("a@example.com"), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, NewsletterError::Content(_)));
    }

    #[test]
    fn welcome_mentions_reactivation() {
        let outcome = SubscriptionOutcome::Reactivated {
            id: "x".into(),
            email: "a@example.com".into(),
        };
        let email = welcome_email(&outcome, "Acme");
        assert!(email.subject.starts_with("Welcome back!"));
        assert_eq!(email.to, vec!["a@example.com".to_string()]);
    }
}
