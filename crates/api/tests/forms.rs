mod common;

use axum::http::StatusCode;
use brochure_core::notify::RecordingNotifier;
use common::{app, app_with, config, json_body};
use serde_json::{json, Value};

fn contact_body() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "Ada@Example.com",
        "howDidYouHear": "search",
        "serviceInterested": "training",
        "message": "Tell me more.",
        "agreeToPrivacy": true,
        "company": "Analytical Engines",
    })
}

#[tokio::test]
async fn contact_submission_is_stored_and_emailed() {
    let app = app(vec![]);
    let (status, response) = json_body(app.post_json("/api/contact", &contact_body()).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    let id = response["id"].as_str().expect("id");

    let stored = app.store.documents_of_type("contactSubmission").await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["_id"], id);
    assert_eq!(stored[0]["email"], "ada@example.com");
    assert_eq!(stored[0]["status"], "new");

    let sent = app.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["team@example.com"]);
    assert_eq!(sent[0].reply_to.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn contact_without_privacy_consent_is_rejected() {
    let app = app(vec![]);
    let mut body = contact_body();
    body["agreeToPrivacy"] = json!(false);

    let (status, response) = json_body(app.post_json("/api/contact", &body).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert!(response["error"].as_str().unwrap().contains("agreeToPrivacy"));
    assert!(app.store.documents_of_type("contactSubmission").await.is_empty());
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn contact_missing_or_blank_fields_are_rejected() {
    let app = app(vec![]);
    for field in ["firstName", "lastName", "email", "howDidYouHear", "serviceInterested", "message"] {
        let mut missing = contact_body();
        missing.as_object_mut().unwrap().remove(field);
        let (status, response) = json_body(app.post_json("/api/contact", &missing).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert!(response["error"].as_str().unwrap().contains(field));

        let mut blank = contact_body();
        blank[field] = json!("   ");
        let response = app.post_json("/api/contact", &blank).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field}");
    }
    assert!(app.store.documents_of_type("contactSubmission").await.is_empty());
}

#[tokio::test]
async fn contact_with_malformed_email_is_rejected() {
    let app = app(vec![]);
    let mut body = contact_body();
    body["email"] = json!("not-an-email");
    let response = app.post_json("/api/contact", &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_store_failure_is_a_500() {
    let app = app(vec![]);
    app.store.set_unavailable(true);

    let (status, response) = json_body(app.post_json("/api/contact", &contact_body()).await).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["message"], "Failed to submit contact form");
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn notifier_failure_does_not_change_the_outcome() {
    let app = app_with(config(&[]), vec![], RecordingNotifier::failing());
    let (status, response) = json_body(app.post_json("/api/contact", &contact_body()).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert_eq!(app.store.documents_of_type("contactSubmission").await.len(), 1);
}

#[tokio::test]
async fn contact_without_recipient_skips_email() {
    let app = app_with(
        config(&[("CONTACT_EMAIL_TO", "")]),
        vec![],
        RecordingNotifier::new(),
    );
    let response = app.post_json("/api/contact", &contact_body()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn newsletter_new_address_subscribes() {
    let app = app(vec![]);
    let (status, response) = json_body(
        app.post_json("/api/newsletter", &json!({"email": "New@Example.com"}))
            .await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert!(response.get("reactivated").is_none());

    let stored = app.store.documents_of_type("newsletterSubscription").await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["email"], "new@example.com");
    assert_eq!(stored[0]["status"], "active");
    assert_eq!(stored[0]["source"], "website");

    let sent = app.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["new@example.com"]);
}

#[tokio::test]
async fn newsletter_unsubscribed_address_is_reactivated() {
    let app = app(vec![json!({
        "_id": "sub-1",
        "_type": "newsletterSubscription",
        "email": "back@example.com",
        "status": "unsubscribed",
        "unsubscribedAt": "2024-01-01T00:00:00Z",
    })]);

    let (status, response) = json_body(
        app.post_json(
            "/api/newsletter",
            &json!({"email": "back@example.com", "source": "footer"}),
        )
        .await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["reactivated"], true);

    let stored = app.store.documents_of_type("newsletterSubscription").await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["status"], "active");
    assert_eq!(stored[0]["source"], "footer");
    assert!(stored[0].get("unsubscribedAt").is_none());
    assert!(stored[0].get("resubscribedAt").is_some());
}

#[tokio::test]
async fn newsletter_active_address_is_a_conflict() {
    let app = app(vec![json!({
        "_id": "sub-1",
        "_type": "newsletterSubscription",
        "email": "here@example.com",
        "status": "active",
    })]);

    let (status, response) = json_body(
        app.post_json("/api/newsletter", &json!({"email": "here@example.com"}))
            .await,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "This email is already subscribed");
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn newsletter_invalid_email_is_rejected() {
    let app = app(vec![]);
    for body in [json!({}), json!({"email": "  "}), json!({"email": "nope"})] {
        let response = app.post_json("/api/newsletter", &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }
    assert!(app.store.documents_of_type("newsletterSubscription").await.is_empty());
}

#[tokio::test]
async fn newsletter_store_failure_is_a_500() {
    let app = app(vec![]);
    app.store.set_unavailable(true);
    let response = app
        .post_json("/api/newsletter", &json!({"email": "a@example.com"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
