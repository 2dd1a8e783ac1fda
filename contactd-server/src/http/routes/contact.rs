//! Contact message endpoints

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::ContactPayload;
use crate::models::ContactMessage;
use crate::pipeline::{SubmissionOutcome, SubmissionPipeline};
use crate::state::AppState;

/// Body of a successful submission
#[derive(Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: ContactMessage,
}

/// Make sure the datastore is connected before any handler runs.
///
/// A no-op once connected; in per-invocation mode this is where the
/// first request of a cold process connects.
async fn ensure_connected(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state.store().await.map_err(ApiError::Unavailable)?;
    Ok(next.run(request).await)
}

/// POST /api/contact - validate and store a contact message
async fn create_contact(
    State(state): State<AppState>,
    ContactPayload(payload): ContactPayload,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let store = state.store().await.map_err(ApiError::Unavailable)?;

    match SubmissionPipeline::new(store.as_ref())
        .submit(&payload, Utc::now())
        .await
    {
        SubmissionOutcome::Created(record) => Ok((
            StatusCode::CREATED,
            Json(CreatedResponse {
                success: true,
                message: "Message sent successfully",
                data: record,
            }),
        )),
        SubmissionOutcome::Invalid(e) => Err(ApiError::Validation(e)),
        SubmissionOutcome::Failed(e) => Err(ApiError::SubmitFailed(e)),
    }
}

/// GET /api/contact - list every stored message
async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let store = state.store().await.map_err(ApiError::Unavailable)?;
    let records = SubmissionPipeline::new(store.as_ref())
        .list_all()
        .await
        .map_err(ApiError::ListFailed)?;
    Ok(Json(records))
}

/// Contact routes
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/contact", get(list_contacts).post(create_contact))
        .route_layer(middleware::from_fn_with_state(state, ensure_connected))
}
