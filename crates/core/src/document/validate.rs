//! Request-level validation shared by the form endpoints.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("{0}")]
    Invalid(String),
}

/// Check that every named field is present and non-empty.
///
/// Strings must be non-blank, booleans must be `true` (consent checkboxes),
/// arrays and objects must be non-empty. `null` counts as missing.
pub fn require_fields(body: &Map<String, Value>, fields: &[&str]) -> Result<(), ValidationError> {
    for field in fields {
        let present = match body.get(*field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Bool(b)) => *b,
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Number(_)) => true,
        };
        if !present {
            return Err(ValidationError::MissingField((*field).to_string()));
        }
    }
    Ok(())
}

/// Trim and lowercase an address, then check its basic shape.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let domain_ok = domain
        .split('.')
        .filter(|part| !part.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok || domain.contains('@') || email.contains(char::is_whitespace)
    {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}
