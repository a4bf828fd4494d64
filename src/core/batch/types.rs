//! Batch processing types and data structures

use crate::sdk::errors::SDKError;
use std::time::Duration;
use thiserror::Error;

/// Why a single batch item failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The item operation returned an error
    #[error("{message}")]
    Operation {
        /// Rendered error
        message: String,
        /// Whether a later attempt could succeed
        retryable: bool,
    },

    /// The item operation exceeded the per-call deadline
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// The item operation panicked
    #[error("Operation panicked: {0}")]
    Panicked(String),
}

impl BatchError {
    /// Non-retryable operation failure with the given message
    pub fn operation(message: impl Into<String>) -> Self {
        BatchError::Operation {
            message: message.into(),
            retryable: false,
        }
    }

    /// Whether a later attempt could reasonably succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            BatchError::Operation { retryable, .. } => *retryable,
            BatchError::Timeout(_) => true,
            BatchError::Panicked(_) => false,
        }
    }
}

impl From<SDKError> for BatchError {
    fn from(err: SDKError) -> Self {
        BatchError::Operation {
            retryable: err.is_retryable(),
            message: err.to_string(),
        }
    }
}

/// A failed item, tagged with its zero-based position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the item in the batch input
    pub index: usize,
    /// Failure reason
    pub error: BatchError,
}

/// Summary of batch execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Items in the batch
    pub total: usize,
    /// Items that produced a value
    pub succeeded: usize,
    /// Items that failed
    pub failed: usize,
    /// Workers actually started
    pub workers: usize,
    /// Wall time from start to completion
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Average wall time per item
    pub fn avg_duration(&self) -> Duration {
        if self.total == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos((self.elapsed.as_nanos() / self.total as u128) as u64)
        }
    }
}

/// Outcome of a whole batch.
///
/// `successes` are in completion order, not input order.
#[derive(Debug, Clone)]
pub struct BatchResult<R> {
    /// Values of the items that succeeded
    pub successes: Vec<R>,
    /// Items that failed
    pub failures: Vec<BatchFailure>,
    /// Counts and timing
    pub summary: BatchSummary,
}

impl<R> BatchResult<R> {
    pub(crate) fn empty() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
            summary: BatchSummary::default(),
        }
    }

    /// True when no item failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Splits into successes and failures
    pub fn into_parts(self) -> (Vec<R>, Vec<BatchFailure>) {
        (self.successes, self.failures)
    }
}
