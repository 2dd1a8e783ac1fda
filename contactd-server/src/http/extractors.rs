//! Custom Axum extractors

use std::collections::HashMap;

use axum::extract::{Form, FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::models::ValidationError;

/// Untyped request body, from JSON or a url-encoded form.
///
/// Unreadable bodies are rejected as a validation error on the payload root.
pub struct ContactPayload(pub Value);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(ValidationError::malformed(e.body_text())))?;

            let object: Map<String, Value> = fields
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            return Ok(Self(Value::Object(object)));
        }

        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(ValidationError::malformed(e.body_text())))?;

        Ok(Self(value))
    }
}
