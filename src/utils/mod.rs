//! Utility functions for key generation and input validation.
//!
//! - [`key_generator`] - Random object key generation
//! - [`page_url`] - Validation of page URLs accepted by the page cache

pub mod key_generator;
pub mod page_url;
