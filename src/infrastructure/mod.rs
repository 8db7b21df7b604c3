//! Infrastructure layer for external integrations.
//!
//! Concrete clients for the collaborators the cache components consume.
//!
//! # Modules
//!
//! - [`store`] - Key-value store abstraction (Redis and in-memory implementations)
//! - [`http`] - Page fetching over HTTP

pub mod http;
pub mod store;
