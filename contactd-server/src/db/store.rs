//! Store and connector traits

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{ContactMessage, NewContactMessage};

/// Default time allowed to reach a reachable server
pub const DEFAULT_SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time before an idle connection is dropped
pub const DEFAULT_SOCKET_TIMEOUT: Duration = Duration::from_secs(45);

/// Default maximum connections for the pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Driver-level bounds applied when connecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub server_selection_timeout: Duration,
    pub socket_timeout: Duration,
    pub max_connections: u32,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            server_selection_timeout: DEFAULT_SERVER_SELECTION_TIMEOUT,
            socket_timeout: DEFAULT_SOCKET_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Durable storage for contact messages.
///
/// The store owns record identity and audit timestamps.
#[async_trait]
pub trait ContactStore: Send + Sync + 'static {
    /// Insert a validated message, returning the stored record.
    async fn insert(&self, message: NewContactMessage) -> Result<ContactMessage, StoreError>;

    /// Every stored message, in no guaranteed order.
    async fn find_all(&self) -> Result<Vec<ContactMessage>, StoreError>;

    /// Release the underlying connection(s).
    async fn close(&self) -> Result<(), StoreError>;
}

/// Establishes a live store from a connection string.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(
        &self,
        url: &str,
        options: &ConnectOptions,
    ) -> Result<Arc<dyn ContactStore>, StoreError>;
}
