//! The run pipeline

use super::options::RunOptions;
use crate::core::batch::{AsyncBatchConfig, BatchSummary};
use crate::core::directory::{broadcast, fetch_client_details};
use crate::sdk::{
    ClientConfig, ClientDetail, Credentials, DirectoryApi, SDKError, Session, filter_clients,
};
use crate::storage::{LocalStorage, StorageError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};

/// Dump of the filtered client list
pub const CLIENTS_FILE: &str = "all_clients.json";

/// Dump of the enriched client details
pub const DETAILS_FILE: &str = "client_info.json";

/// Reasons a run stops early
#[derive(Error, Debug)]
pub enum RunError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[source] SDKError),

    /// Broadcast message could not be read
    #[error("Message error: {0}")]
    Message(String),

    /// Authentication failed or returned no token
    #[error("Authentication failed: {0}")]
    Auth(#[source] SDKError),

    /// The pre-flight message was rejected
    #[error("Test message failed: {0}")]
    TestMessage(#[source] SDKError),

    /// The client list could not be fetched
    #[error("Listing clients failed: {0}")]
    Listing(#[source] SDKError),

    /// A dump could not be written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Everything a run needs besides the client
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Directory for the JSON dumps
    pub output_dir: PathBuf,
    /// Batch settings for detail fetching
    pub detail_batch: AsyncBatchConfig,
    /// Batch settings for the broadcast
    pub send_batch: AsyncBatchConfig,
    /// Broadcast text; `None` skips sending entirely
    pub message: Option<String>,
    /// First recipient of the broadcast
    pub start_index: usize,
    /// Recipient of the pre-flight message
    pub test_recipient: Option<String>,
    /// Details to log after enrichment
    pub preview: usize,
}

impl PipelineSettings {
    /// Combines client configuration with command-line options
    pub fn from_config(config: &ClientConfig, options: &RunOptions, message: Option<String>) -> Self {
        let settings = &config.settings;
        let batch = |workers: usize| {
            AsyncBatchConfig::new()
                .with_workers(workers)
                .with_pacing(settings.pacing())
                .with_call_timeout(settings.call_deadline())
        };

        Self {
            output_dir: options.output_dir.clone(),
            detail_batch: batch(settings.workers),
            send_batch: batch(settings.send_workers),
            message,
            start_index: options.start_index,
            test_recipient: config.test_recipient.clone(),
            preview: options.preview,
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rows returned by the listing call
    pub listed: usize,
    /// Rows kept by the filter
    pub retained: usize,
    /// Rows dropped by the filter
    pub dropped: usize,
    /// Detail batch outcome
    pub details: BatchSummary,
    /// Broadcast outcome, if one ran
    pub broadcast: Option<BatchSummary>,
    /// Where the dumps were written
    pub output_dir: PathBuf,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

/// One run against a [`DirectoryApi`]
pub struct Pipeline<A: DirectoryApi + ?Sized> {
    api: Arc<A>,
    credentials: Credentials,
    settings: PipelineSettings,
}

impl<A> Pipeline<A>
where
    A: DirectoryApi + ?Sized + 'static,
{
    /// Create a new pipeline
    pub fn new(api: Arc<A>, credentials: Credentials, settings: PipelineSettings) -> Self {
        Self {
            api,
            credentials,
            settings,
        }
    }

    /// Runs every step, stopping at the first step that fails.
    ///
    /// Per-client failures inside the batches are logged and counted in the
    /// report; they do not stop the run.
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let started = Instant::now();

        let session = self
            .api
            .authenticate(&self.credentials)
            .await
            .map_err(RunError::Auth)?;

        if let Some(message) = &self.settings.message {
            self.send_test_message(&session, message).await?;
        }

        let page = self
            .api
            .list_clients(&session, 0)
            .await
            .map_err(RunError::Listing)?;
        let listed = page.rows.len();
        let filtered = filter_clients(page);
        let (retained, dropped) = (filtered.retained.len(), filtered.dropped);

        let storage = LocalStorage::new(&self.settings.output_dir).await?;
        storage.write_json(CLIENTS_FILE, &filtered.retained).await?;

        info!("Fetching details for {} clients", retained);
        let details = fetch_client_details(
            Arc::clone(&self.api),
            &session,
            filtered.retained,
            &self.settings.detail_batch,
        )
        .await;
        info!(
            "Client details took {:?} ({} ok, {} failed)",
            details.summary.elapsed, details.summary.succeeded, details.summary.failed
        );

        storage.write_json(DETAILS_FILE, &details.successes).await?;
        self.log_preview(&details.successes);

        let sent = match &self.settings.message {
            Some(message) => Some(
                self.run_broadcast(&session, &details.successes, message)
                    .await,
            ),
            None => {
                info!("No message configured, skipping broadcast");
                None
            }
        };

        info!("Run complete. Total clients: {}", details.summary.succeeded);
        Ok(RunReport {
            listed,
            retained,
            dropped,
            details: details.summary,
            broadcast: sent,
            output_dir: self.settings.output_dir.clone(),
            elapsed: started.elapsed(),
        })
    }

    async fn send_test_message(&self, session: &Session, message: &str) -> Result<(), RunError> {
        let Some(recipient) = &self.settings.test_recipient else {
            return Ok(());
        };

        info!("Sending test message to {}", recipient);
        self.api
            .send_message(session, recipient, message)
            .await
            .map_err(RunError::TestMessage)?;
        info!("Test message delivered");
        Ok(())
    }

    async fn run_broadcast(
        &self,
        session: &Session,
        recipients: &[ClientDetail],
        message: &str,
    ) -> BatchSummary {
        let result = broadcast(
            Arc::clone(&self.api),
            session,
            recipients,
            message,
            self.settings.start_index,
            &self.settings.send_batch,
        )
        .await;

        for failure in &result.failures {
            error!(
                "Broadcast failed for recipient #{}: {}",
                self.settings.start_index + failure.index,
                failure.error
            );
        }
        info!("Broadcast finished");
        result.summary
    }

    fn log_preview(&self, details: &[ClientDetail]) {
        for detail in details.iter().take(self.settings.preview) {
            info!("Client {} -> telegram id {}", detail.id, detail.telegram_id);
        }
        if details.len() > self.settings.preview {
            info!("... and {} more clients", details.len() - self.settings.preview);
        }
        if details.is_empty() {
            warn!("No client details were fetched");
        }
    }
}
