//! Run driver
//!
//! Wires configuration, the directory client and the batch jobs into one
//! run: authenticate, optionally send a test message, list and filter
//! clients, dump them, enrich them, dump the details and optionally
//! broadcast.

mod options;
mod pipeline;


pub use options::RunOptions;
pub use pipeline::{CLIENTS_FILE, DETAILS_FILE, Pipeline, PipelineSettings, RunError, RunReport};

use crate::sdk::{ClientConfig, DirectoryClient};
use std::sync::Arc;
use tracing::{info, warn};

/// Loads configuration from `options`, builds the client and runs the pipeline
pub async fn run(options: RunOptions) -> Result<RunReport, RunError> {
    let config = load_config(&options)?;
    let message = options.message_text()?;

    let settings = PipelineSettings::from_config(&config, &options, message);
    let credentials = config.credentials();
    let client = DirectoryClient::new(config).map_err(RunError::Config)?;

    Pipeline::new(Arc::new(client), credentials, settings)
        .run()
        .await
}

/// File, then `DIRECTORY_*` environment, then command-line flags
pub fn load_config(options: &RunOptions) -> Result<ClientConfig, RunError> {
    let mut config = if options.config.exists() {
        info!("Loading configuration from {}", options.config.display());
        ClientConfig::from_file(&options.config).map_err(RunError::Config)?
    } else {
        warn!(
            "Config file {} not found, using environment only",
            options.config.display()
        );
        ClientConfig::default()
    };

    config.apply_env_overrides().map_err(RunError::Config)?;
    options.apply_to(&mut config);
    config.validate().map_err(RunError::Config)?;
    Ok(config)
}
