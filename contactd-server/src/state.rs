//! Application state shared across handlers

use std::sync::Arc;

use crate::config::DeploymentMode;
use crate::db::{ConnectionManager, ContactStore};
use crate::error::DbResult;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    connections: ConnectionManager,
    mode: DeploymentMode,
}

impl AppState {
    pub fn new(connections: ConnectionManager, mode: DeploymentMode) -> Self {
        Self {
            inner: Arc::new(AppStateInner { connections, mode }),
        }
    }

    pub fn connections(&self) -> &ConnectionManager {
        &self.inner.connections
    }

    pub fn mode(&self) -> DeploymentMode {
        self.inner.mode
    }

    /// Live store, connecting on first use
    pub async fn store(&self) -> DbResult<Arc<dyn ContactStore>> {
        self.inner.connections.connect().await
    }
}
