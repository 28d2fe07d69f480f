#![allow(dead_code)]

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::{to_bytes, Body, HttpBody};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use brochure_api::{build_router, AppConfig, AppState};
use brochure_core::content::MemoryContentStore;
use brochure_core::events::bus::EventBus;
use brochure_core::notify::RecordingNotifier;
use brochure_core::revalidate::RecordingRevalidator;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "test-webhook-secret";

/// A router wired to in-process collaborators the test can inspect.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryContentStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub revalidator: Arc<RecordingRevalidator>,
    pub events: EventBus,
}

pub fn config(vars: &[(&str, &str)]) -> AppConfig {
    let mut env: HashMap<String, String> = HashMap::from([
        ("CMS_BACKEND".to_string(), "memory".to_string()),
        ("SANITY_WEBHOOK_SECRET".to_string(), SECRET.to_string()),
        ("CONTACT_EMAIL_TO".to_string(), "team@example.com".to_string()),
        ("SITE_NAME".to_string(), "Acme".to_string()),
    ]);
    for (key, value) in vars {
        env.insert(key.to_string(), value.to_string());
    }
    AppConfig::from_lookup(|key| env.get(key).cloned()).expect("valid test config")
}

pub fn app(documents: Vec<Value>) -> TestApp {
    app_with(config(&[]), documents, RecordingNotifier::new())
}

pub fn app_with(config: AppConfig, documents: Vec<Value>, notifier: RecordingNotifier) -> TestApp {
    let store = Arc::new(MemoryContentStore::with_documents(documents));
    let notifier = Arc::new(notifier);
    let revalidator = Arc::new(RecordingRevalidator::new());
    let events = EventBus::new(config.event_bus_capacity);
    let state = AppState::new(
        config,
        store.clone(),
        notifier.clone(),
        revalidator.clone(),
        events.clone(),
    );
    TestApp {
        router: build_router(state),
        store,
        notifier,
        revalidator,
        events,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Next data frame of a streaming body, as text.
pub async fn next_chunk(body: &mut Body) -> Option<String> {
    loop {
        let frame = std::future::poll_fn(|cx| Pin::new(&mut *body).poll_frame(cx))
            .await?
            .ok()?;
        if let Ok(data) = frame.into_data() {
            return Some(String::from_utf8_lossy(&data).into_owned());
        }
    }
}

pub async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
