//! contactd-server: contact form backend
//!
//! Accepts contact-form submissions over HTTP, validates them and stores
//! them in a datastore; also lists everything stored.

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod pipeline;
pub mod state;

use std::sync::Arc;

pub use bootstrap::bootstrap;
pub use config::{DeploymentMode, ServerConfig};
pub use error::{DbError, StoreError};
pub use http::{build_router, run_server, ServerError};
pub use state::AppState;

/// Bootstrap for the configured deployment mode and serve until shutdown.
///
/// In AlwaysOn mode a startup connection failure is returned before the
/// listener binds.
pub async fn serve(config: ServerConfig, connector: Arc<dyn db::Connector>) -> Result<(), ServerError> {
    let state = bootstrap(&config, connector).await?;
    run_server(state, &config).await
}
