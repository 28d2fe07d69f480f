use chrono::{DateTime, Utc};
use maud::html;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::content::store::{ContentError, ContentStore};
use crate::content::types::doc_type;
use crate::document::id::DocumentIdKind;
use crate::document::validate::{normalize_email, require_fields, ValidationError};
use crate::mutation::types::Mutation;
use crate::notify::EmailMessage;

pub const REQUIRED_FIELDS: [&str; 7] = [
    "firstName",
    "lastName",
    "email",
    "howDidYouHear",
    "serviceInterested",
    "message",
    "agreeToPrivacy",
];

/// A validated contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub how_did_you_hear: String,
    pub service_interested: String,
    pub message: String,
    pub agree_to_privacy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactForm {
    /// Validate a raw request body.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let fields = body
            .as_object()
            .ok_or_else(|| ValidationError::Invalid("request body must be a JSON object".into()))?;
        require_fields(fields, &REQUIRED_FIELDS)?;

        let mut form: ContactForm = serde_json::from_value(body.clone())
            .map_err(|e| ValidationError::Invalid(e.to_string()))?;
        form.email = normalize_email(&form.email)?;
        for field in [
            &mut form.first_name,
            &mut form.last_name,
            &mut form.how_did_you_hear,
            &mut form.service_interested,
            &mut form.message,
        ] {
            *field = field.trim().to_string();
        }
        Ok(form)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn to_document(&self, id: &str, now: DateTime<Utc>) -> Value {
        json!({
            "_id": id,
            "_type": doc_type::CONTACT_SUBMISSION,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "company": self.company,
            "phone": self.phone,
            "howDidYouHear": self.how_did_you_hear,
            "serviceInterested": self.service_interested,
            "message": self.message,
            "agreeToPrivacy": self.agree_to_privacy,
            "submissionDate": now.to_rfc3339(),
            "status": "new",
        })
    }
}

/// Persist the submission. Returns the new document ID.
pub async fn submit(
    store: &dyn ContentStore,
    form: &ContactForm,
    now: DateTime<Utc>,
) -> Result<String, ContentError> {
    let id = DocumentIdKind::generate().base_id().to_string();
    let response = store
        .mutate(vec![Mutation::Create(form.to_document(&id, now))])
        .await?;
    Ok(response.first_id().unwrap_or(id.as_str()).to_string())
}

/// Notice to the site team; replies go to the submitter.
pub fn notification_email(form: &ContactForm, recipient: &str) -> EmailMessage {
    let company = form.company.as_deref().unwrap_or("-");
    let phone = form.phone.as_deref().unwrap_or("-");
    let html = html! {
        h2 { "New contact form submission" }
        table {
            tr { th { "Name" } td { (form.full_name()) } }
            tr { th { "Email" } td { (form.email) } }
            tr { th { "Company" } td { (company) } }
            tr { th { "Phone" } td { (phone) } }
            tr { th { "Service" } td { (form.service_interested) } }
            tr { th { "Heard about us" } td { (form.how_did_you_hear) } }
        }
        h3 { "Message" }
        p { (form.message) }
    };
    let text = format!(
        "New contact form submission\n\nName: {}\nEmail: {}\nCompany: {company}\nPhone: {phone}\nService: {}\nHeard about us: {}\n\n{}\n",
        form.full_name(),
        form.email,
        form.service_interested,
        form.how_did_you_hear,
        form.message,
    );
    EmailMessage {
        to: vec![recipient.to_string()],
        subject: format!("New enquiry from {}", form.full_name()),
        html: html.into_string(),
        text,
        reply_to: Some(form.email.clone()),
    }
}
