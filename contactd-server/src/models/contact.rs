//! Contact message model and payload validation

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::{FieldViolation, ValidationError};

/// Minimum length for the sender name, in characters
pub const MIN_NAME_LEN: usize = 2;

/// Minimum length for the message body, in characters
pub const MIN_MESSAGE_LEN: usize = 10;

/// Local part, `@`, then dot-separated labels ending in an alphabetic TLD.
/// Leading dots and `..` runs are rejected separately (no lookaround in `regex`).
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("invalid email regex")
});

/// Persisted contact message, as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated contact message, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl NewContactMessage {
    /// Validate an untrusted payload.
    ///
    /// Every field is checked and all violations are reported together.
    /// `received_at` becomes `createdAt` unless the payload carries its own.
    ///
    /// # Rules
    /// - `name`: string, at least 2 characters
    /// - `email`: string in email syntax
    /// - `message`: string, at least 10 characters
    /// - `createdAt`: optional RFC 3339 timestamp
    ///
    /// # Example
    /// ```
    /// use contactd_server::models::NewContactMessage;
    /// use serde_json::json;
    ///
    /// let now = chrono::Utc::now();
    /// let ok = json!({"name": "Al", "email": "al@example.com", "message": "Hello there, need a meeting."});
    /// assert!(NewContactMessage::validate(&ok, now).is_ok());
    ///
    /// let bad = json!({"name": "A", "email": "bad", "message": "short"});
    /// assert_eq!(NewContactMessage::validate(&bad, now).unwrap_err().violations().len(), 3);
    /// ```
    pub fn validate(payload: &Value, received_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let Some(fields) = payload.as_object() else {
            return Err(ValidationError::new(vec![FieldViolation::invalid_type(
                "", "object",
            )]));
        };

        let mut violations = Vec::new();

        let name = min_len_string(fields, "name", MIN_NAME_LEN, &mut violations);
        let email = email_string(fields, "email", &mut violations);
        let message = min_len_string(fields, "message", MIN_MESSAGE_LEN, &mut violations);
        let created_at = optional_timestamp(fields, "createdAt", &mut violations);

        match (name, email, message, created_at) {
            (Some(name), Some(email), Some(message), Some(created_at))
                if violations.is_empty() =>
            {
                Ok(Self {
                    name,
                    email,
                    message,
                    created_at: created_at.unwrap_or(received_at),
                })
            }
            _ => Err(ValidationError::new(violations)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Check an email address against the accepted syntax.
pub fn is_valid_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

fn required_string(
    fields: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::required(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(FieldViolation::invalid_type(field, "string"));
            None
        }
    }
}

fn min_len_string(
    fields: &Map<String, Value>,
    field: &str,
    min: usize,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let s = required_string(fields, field, violations)?;
    if s.chars().count() < min {
        violations.push(FieldViolation::too_small(field, min));
        return None;
    }
    Some(s)
}

fn email_string(
    fields: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let s = required_string(fields, field, violations)?;
    if !is_valid_email(&s) {
        violations.push(FieldViolation::invalid_string(field, "email"));
        return None;
    }
    Some(s)
}

/// `Some(None)` when absent, `Some(Some(ts))` when valid, `None` on violation
fn optional_timestamp(
    fields: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<Option<DateTime<Utc>>> {
    match fields.get(field) {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(ts) => Some(Some(ts.with_timezone(&Utc))),
            Err(_) => {
                violations.push(FieldViolation::invalid_date(field));
                None
            }
        },
        Some(_) => {
            violations.push(FieldViolation::invalid_type(field, "date"));
            None
        }
    }
}
