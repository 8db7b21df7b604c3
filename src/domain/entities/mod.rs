//! Core domain entities.
//!
//! Plain data structures describing what the cache stores and what the
//! instrumentation records. They carry no I/O.
//!
//! # Entity Types
//!
//! - [`StoredValue`] - A value accepted by the object cache
//! - [`Replay`] - The recorded call history of an operation
//!
//! Decoders that turn retrieved bytes back into typed values live next to
//! [`StoredValue`].

pub mod replay;
pub mod stored_value;

pub use replay::{RecordedCall, Replay};
pub use stored_value::{DecodeError, StoredValue, decode_float, decode_int, decode_str};
