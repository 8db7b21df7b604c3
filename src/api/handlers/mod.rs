//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod history;
pub mod objects;
pub mod pages;

pub use health::health_handler;
pub use history::history_handler;
pub use objects::{get_object_handler, store_object_handler};
pub use pages::{page_count_handler, page_handler};
