//! Command implementations for the contactd CLI

pub mod serve;
