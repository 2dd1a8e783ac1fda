//! HTTP server layer
//!
//! Axum server with:
//! - CORS (origin allow-list)
//! - Request tracing
//! - Panic catching and JSON fallback
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerError};
