//! Directory service client
//!
//! HTTP client for the four remote operations (authenticate, list clients,
//! client detail, send message) and the [`DirectoryApi`] seam the batch
//! layer and the run driver are written against.

mod auth;
mod client;
mod directory;
mod messaging;
mod traits;


// Re-export public types and the main client
pub use client::DirectoryClient;
pub use directory::filter_clients;
pub use traits::DirectoryApi;

#[cfg(test)]
pub use traits::MockDirectoryApi;
