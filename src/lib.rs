//! platform-smoke - smoke tests for the cloud platform API client
//!
//! This library provides a minimal platform client (client-credentials
//! auth, mTLS gateway, proxy, Users API) and an ordered suite runner that
//! exercises it.

pub mod cli;
pub mod client;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Config, Error, Result};
pub use testing::{Session, Suite};
