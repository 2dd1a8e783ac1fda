//! In-process store
//!
//! Used for local runs without a database (`contactd serve --memory`)
//! and as the fake datastore in tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{ConnectOptions, Connector, ContactStore};
use crate::error::StoreError;
use crate::models::{ContactMessage, NewContactMessage};

/// Contact messages held in memory for the life of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ContactMessage>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail, as if the server went away.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert(&self, message: NewContactMessage) -> Result<ContactMessage, StoreError> {
        self.check_online()?;

        let record = ContactMessage {
            id: Uuid::new_v4(),
            name: message.name().to_owned(),
            email: message.email().to_owned(),
            message: message.message().to_owned(),
            created_at: message.created_at(),
            updated_at: Utc::now(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        self.check_online()?;
        Ok(self.records.read().await.clone())
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

/// Hands out one shared `MemoryStore`, counting connection attempts.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    store: Arc<MemoryStore>,
    attempts: Arc<AtomicUsize>,
    unreachable: Arc<AtomicBool>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose every connection attempt fails.
    pub fn unreachable() -> Self {
        let connector = Self::default();
        connector.set_unreachable(true);
        connector
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// The store handed out on successful connects
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    /// Number of connection attempts made so far
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(
        &self,
        url: &str,
        _options: &ConnectOptions,
    ) -> Result<Arc<dyn ContactStore>, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "no server reachable at {}",
                url
            )));
        }
        let store: Arc<dyn ContactStore> = self.store.clone();
        Ok(store)
    }
}
