//! Directory service SDK
//!
//! Typed client for the remote directory: authentication, client listing,
//! per-client detail and message sending.

pub mod client;
pub mod config;
pub mod errors;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use client::{DirectoryApi, DirectoryClient, filter_clients};
pub use config::{ClientConfig, ClientSettings, ConfigBuilder};
pub use errors::{Result, SDKError};
pub use session::Session;
pub use types::*;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
