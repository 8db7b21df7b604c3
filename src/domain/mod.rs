//! Domain layer containing the cache's data model.
//!
//! # Architecture
//!
//! - [`entities`] - Stored values, decoders and call history
//! - [`keys`] - Store key layout for objects, counters, history and pages
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Store access goes through [`crate::infrastructure::store::KeyValueStore`].

pub mod entities;
pub mod keys;
