use async_trait::async_trait;
use brochure_core::notify::{EmailMessage, Notifier, NotifyError};
use serde::Serialize;

use crate::{error_message, http_client};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct SendEmail<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Delivers notifications through the Resend API.
pub struct ResendNotifier {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl ResendNotifier {
    pub fn new(api_key: String, from: String) -> Result<Self, NotifyError> {
        let http = http_client().map_err(|e| NotifyError::Request(e.to_string()))?;
        Ok(Self {
            http,
            api_key,
            from,
        })
    }

    fn payload<'a>(&'a self, message: &'a EmailMessage) -> SendEmail<'a> {
        SendEmail {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
            reply_to: message.reply_to.as_deref(),
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    fn provider_tag(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response).await;
            return Err(NotifyError::Upstream { status, message });
        }
        Ok(())
    }
}
