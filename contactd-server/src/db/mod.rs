//! Database layer - connection lifecycle and contact message stores
//!
//! # Design Principles
//!
//! - One live store per `ConnectionManager`, established lazily
//! - Backends sit behind `ContactStore`/`Connector` so tests can swap them
//! - Schema is created idempotently on connect

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod store;

pub use connection::{ConnectionManager, ConnectionState};
pub use memory::{MemoryConnector, MemoryStore};
pub use postgres::{PgConnector, PgContactStore};
pub use store::{ConnectOptions, Connector, ContactStore};
