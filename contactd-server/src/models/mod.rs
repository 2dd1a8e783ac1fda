//! Domain models with validation at construction
//!
//! Untrusted input only becomes a `NewContactMessage` by passing
//! validation. Invalid input returns ValidationError, not panic.

pub mod contact;
pub mod validation;

pub use contact::{ContactMessage, NewContactMessage};
pub use validation::{FieldViolation, ValidationError, ViolationCode};
