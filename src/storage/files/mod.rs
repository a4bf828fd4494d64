//! File storage implementation
//!
//! This module writes pretty-printed JSON dumps to the local file system.

mod local;

// Re-export public types
pub use local::{LocalStorage, to_pretty_json};
