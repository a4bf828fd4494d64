//! # directory-mailer
//!
//! Batch client for a remote client directory. It authenticates once, lists
//! clients, enriches every client with its detail record and can broadcast a
//! message to all of them.
//!
//! ## Features
//!
//! - **Typed SDK**: the four remote operations over `reqwest`, with a
//!   single-assignment [`Session`](sdk::Session) carrying the bearer token
//! - **Paced worker pool**: a fixed number of workers drain a queue holding
//!   the whole batch and pause after every call to stay under rate limits
//! - **Contained failures**: one failing, hanging or panicking item never
//!   stops the batch; every item yields exactly one outcome
//! - **Resumable broadcast**: a start index skips recipients already served
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use directory_mailer::core::batch::AsyncBatchConfig;
//! use directory_mailer::core::directory::fetch_client_details;
//! use directory_mailer::sdk::{ConfigBuilder, DirectoryClient, filter_clients};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigBuilder::new()
//!         .credentials("login", "password", "ru")
//!         .bot_id("1")
//!         .build();
//!     let client = Arc::new(DirectoryClient::new(config)?);
//!
//!     let session = client.login().await?;
//!     let clients = filter_clients(client.list_clients(&session, 0).await?);
//!
//!     let details = fetch_client_details(
//!         client,
//!         &session,
//!         clients.retained,
//!         &AsyncBatchConfig::new().with_workers(20),
//!     )
//!     .await;
//!     println!("{} details, {} failures", details.successes.len(), details.failures.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod core;
pub mod runner;
pub mod sdk;
pub mod storage;
pub mod utils;

// Re-export main types
pub use core::batch::{
    AsyncBatchConfig, AsyncBatchExecutor, BatchError, BatchFailure, BatchResult, BatchSummary,
    map_concurrent,
};
pub use sdk::{DirectoryApi, DirectoryClient, SDKError, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
