//! Auth API Shared Library
//!
//! Wire types shared between the backend and any frontend consumer.
//! All request and response structs serialize with camelCase field names,
//! matching the public API contract.

pub mod types;

pub use types::*;
