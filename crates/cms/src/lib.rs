//! HTTP adapters for the services this site delegates to: the Sanity
//! content API, the Resend email API, and the hosting platform's cache purge
//! endpoint.

pub mod email;
pub mod purge;
pub mod sanity;

pub use email::ResendNotifier;
pub use purge::HttpPurgeRevalidator;
pub use sanity::{SanityClient, SanityConfig};

use std::time::Duration;

const TIMEOUT_SECONDS: u64 = 10;

fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECONDS))
        .user_agent(concat!("brochure-site/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Read an error body, preferring a structured description when present.
async fn error_message(response: reqwest::Response) -> String {
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            v.pointer("/error/description")
                .or_else(|| v.pointer("/message"))
                .or_else(|| v.pointer("/error"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or(text)
}
