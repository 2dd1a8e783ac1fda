//! Submission pipeline
//!
//! Validates untrusted payloads, persists valid ones and lists everything
//! stored. Outcomes are values, so the HTTP layer can match on them
//! exhaustively. Store failures are logged where they are mapped to
//! responses.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::db::ContactStore;
use crate::error::{DbResult, StoreError};
use crate::models::{ContactMessage, NewContactMessage, ValidationError};

/// Result of a validate-and-create request
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Stored; carries the record with its assigned identity
    Created(ContactMessage),
    /// Payload rejected; nothing was stored
    Invalid(ValidationError),
    /// Payload was valid but the store failed
    Failed(StoreError),
}

/// Validate-and-create and list-all over a live store
pub struct SubmissionPipeline<'a> {
    store: &'a dyn ContactStore,
}

impl<'a> SubmissionPipeline<'a> {
    pub fn new(store: &'a dyn ContactStore) -> Self {
        Self { store }
    }

    /// Validate `payload` and store it.
    ///
    /// `received_at` is used as `createdAt` when the payload has none.
    pub async fn submit(&self, payload: &Value, received_at: DateTime<Utc>) -> SubmissionOutcome {
        let message = match NewContactMessage::validate(payload, received_at) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(violations = e.violations().len(), "contact payload rejected");
                return SubmissionOutcome::Invalid(e);
            }
        };

        match self.store.insert(message).await {
            Ok(record) => {
                tracing::info!(id = %record.id, "contact message stored");
                SubmissionOutcome::Created(record)
            }
            Err(e) => SubmissionOutcome::Failed(e),
        }
    }

    /// Every stored message, unfiltered and unpaginated.
    pub async fn list_all(&self) -> DbResult<Vec<ContactMessage>> {
        let records = self.store.find_all().await?;
        tracing::debug!(count = records.len(), "listed contact messages");
        Ok(records)
    }
}
