//! Bounded, paced batch execution
//!
//! This module provides the worker pool both directory jobs run on.

mod async_batch;
mod types;


// Re-export all public types
pub use async_batch::{AsyncBatchConfig, AsyncBatchExecutor, DEFAULT_PACING, map_concurrent};
pub use types::{BatchError, BatchFailure, BatchResult, BatchSummary};
