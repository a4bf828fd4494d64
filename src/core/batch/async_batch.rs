//! Async Batch Execution - Paced Worker Pool
//!
//! A fixed pool of workers drains a queue holding the whole batch. Each worker
//! handles one item at a time and sleeps for the pacing interval after every
//! call, which caps the request rate at roughly `workers` calls per interval.

use super::types::{BatchError, BatchFailure, BatchResult, BatchSummary};
use crossbeam_queue::ArrayQueue;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Default pause after each call
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// Configuration for async batch processing
#[derive(Debug, Clone)]
pub struct AsyncBatchConfig {
    /// Maximum concurrent workers (default: 10)
    pub workers: usize,
    /// Pause each worker takes after a call (default: 100ms)
    pub pacing: Duration,
    /// Deadline for a single item (default: 30s)
    pub call_timeout: Option<Duration>,
}

impl Default for AsyncBatchConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            pacing: DEFAULT_PACING,
            call_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl AsyncBatchConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set worker count, at least one
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set pacing interval
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set per-item deadline
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Let item calls run without a deadline
    pub fn without_call_timeout(mut self) -> Self {
        self.call_timeout = None;
        self
    }
}

/// Async batch executor for bounded, paced fan-out
#[derive(Debug, Clone, Default)]
pub struct AsyncBatchExecutor {
    config: AsyncBatchConfig,
}

impl AsyncBatchExecutor {
    /// Create a new batch executor
    pub fn new(config: AsyncBatchConfig) -> Self {
        Self { config }
    }

    /// Runs `operation` once for every item and collects the outcomes.
    ///
    /// Every item yields exactly one success or one failure; a failing,
    /// timed-out or panicking item never stops its worker or the batch.
    /// Both result sinks are sized to the batch and drained here, so the
    /// returned [`BatchResult`] is complete and nothing is left pending.
    ///
    /// # Example
    /// ```rust,ignore
    /// let executor = AsyncBatchExecutor::new(AsyncBatchConfig::new().with_workers(5));
    /// let result = executor
    ///     .execute(ids, move |id| {
    ///         let api = api.clone();
    ///         async move { api.fetch(id).await }
    ///     })
    ///     .await;
    /// ```
    pub async fn execute<T, R, E, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        operation: F,
    ) -> BatchResult<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Into<BatchError> + Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
    {
        let started = Instant::now();
        let items: Vec<T> = items.into_iter().collect();
        let total = items.len();

        if total == 0 {
            debug!("Empty batch, nothing to do");
            return BatchResult::empty();
        }

        let queue = Arc::new(ArrayQueue::new(total));
        for entry in items.into_iter().enumerate() {
            // capacity is exactly the item count
            if queue.push(entry).is_err() {
                unreachable!("batch queue sized to its input");
            }
        }

        let workers = self.config.workers.max(1).min(total);
        info!("Processing {} items with {} workers", total, workers);

        let (success_tx, mut success_rx) = mpsc::channel::<R>(total);
        let (failure_tx, mut failure_rx) = mpsc::channel::<BatchFailure>(total);
        let operation = Arc::new(operation);

        let mut pool = JoinSet::new();
        for worker_id in 0..workers {
            pool.spawn(run_worker(
                worker_id,
                Arc::clone(&queue),
                Arc::clone(&operation),
                success_tx.clone(),
                failure_tx.clone(),
                self.config.clone(),
            ));
        }
        drop(success_tx);
        drop(failure_tx);

        let mut claimed = 0usize;
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(processed) => claimed += processed,
                Err(e) => error!("Batch worker terminated abnormally: {}", e),
            }
        }
        debug!("All workers exited after claiming {} items", claimed);

        // Every sender is gone, so both loops end once the buffers are empty.
        let mut successes = Vec::with_capacity(total);
        while let Some(value) = success_rx.recv().await {
            successes.push(value);
        }
        let mut failures = Vec::new();
        while let Some(failure) = failure_rx.recv().await {
            failures.push(failure);
        }

        let summary = BatchSummary {
            total,
            succeeded: successes.len(),
            failed: failures.len(),
            workers,
            elapsed: started.elapsed(),
        };
        info!(
            "Batch finished: {} succeeded, {} failed in {:?}",
            summary.succeeded, summary.failed, summary.elapsed
        );

        BatchResult {
            successes,
            failures,
            summary,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &AsyncBatchConfig {
        &self.config
    }
}

async fn run_worker<T, R, E, F, Fut>(
    worker_id: usize,
    queue: Arc<ArrayQueue<(usize, T)>>,
    operation: Arc<F>,
    successes: mpsc::Sender<R>,
    failures: mpsc::Sender<BatchFailure>,
    config: AsyncBatchConfig,
) -> usize
where
    E: Into<BatchError>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    let mut processed = 0;

    while let Some((index, item)) = queue.pop() {
        debug!(worker_id, index, "Worker claimed item");

        match run_item(operation.as_ref(), item, config.call_timeout).await {
            Ok(value) => {
                if successes.send(value).await.is_err() {
                    error!(worker_id, index, "Success sink closed");
                }
            }
            Err(error) => {
                warn!(worker_id, index, %error, "Batch item failed");
                if failures.send(BatchFailure { index, error }).await.is_err() {
                    error!(worker_id, index, "Failure sink closed");
                }
            }
        }
        processed += 1;

        if !config.pacing.is_zero() {
            tokio::time::sleep(config.pacing).await;
        }
    }

    debug!(worker_id, processed, "Worker finished");
    processed
}

async fn run_item<T, R, E, F, Fut>(
    operation: &F,
    item: T,
    call_timeout: Option<Duration>,
) -> std::result::Result<R, BatchError>
where
    E: Into<BatchError>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    let call = AssertUnwindSafe(async move { operation(item).await }).catch_unwind();

    let outcome = match call_timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(outcome) => outcome,
            Err(_) => return Err(BatchError::Timeout(limit)),
        },
        None => call.await,
    };

    match outcome {
        Ok(result) => result.map_err(Into::into),
        Err(panic) => Err(BatchError::Panicked(panic_message(&*panic))),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs `operation` over `items` with `workers` paced workers
pub async fn map_concurrent<T, R, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    workers: usize,
    operation: F,
    pacing: Duration,
) -> BatchResult<R>
where
    T: Send + 'static,
    R: Send + 'static,
    E: Into<BatchError> + Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
{
    let config = AsyncBatchConfig::new()
        .with_workers(workers)
        .with_pacing(pacing);
    AsyncBatchExecutor::new(config)
        .execute(items, operation)
        .await
}
