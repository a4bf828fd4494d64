//! Command-line options

use super::pipeline::RunError;
use crate::sdk::ClientConfig;
use crate::utils::logging::{LogFormat, LogOptions};
use clap::Parser;
use std::path::PathBuf;

/// Batch client for the client directory
#[derive(Debug, Clone, Parser)]
#[command(
    name = "directory-mailer",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about = "Fetch, enrich and message directory clients in paced batches"
)]
pub struct RunOptions {
    /// Configuration file (JSON or YAML)
    #[arg(short, long, env = "DIRECTORY_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Directory the JSON dumps are written to
    #[arg(short, long, default_value = "users_json")]
    pub output_dir: PathBuf,

    /// Workers for the detail batch
    #[arg(long)]
    pub workers: Option<usize>,

    /// Workers for the broadcast batch
    #[arg(long)]
    pub send_workers: Option<usize>,

    /// Pause after each call, in milliseconds
    #[arg(long)]
    pub pacing_ms: Option<u64>,

    /// Message to broadcast; nothing is sent without one
    #[arg(short, long, conflicts_with = "message_file")]
    pub message: Option<String>,

    /// Read the broadcast message from a file
    #[arg(long)]
    pub message_file: Option<PathBuf>,

    /// Skip this many recipients, to resume an interrupted broadcast
    #[arg(long, default_value_t = 0)]
    pub start_index: usize,

    /// Do not send the pre-flight test message
    #[arg(long)]
    pub skip_test_message: bool,

    /// Number of details to log after enrichment
    #[arg(long, default_value_t = 10)]
    pub preview: usize,

    /// Append logs to this file instead of stderr
    #[arg(long, env = "DIRECTORY_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl RunOptions {
    /// Logging settings derived from the flags
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            file: self.log_file.clone(),
            format: self.log_format,
            ..Default::default()
        }
    }

    /// Overrides configuration values given on the command line
    pub fn apply_to(&self, config: &mut ClientConfig) {
        if let Some(workers) = self.workers {
            config.settings.workers = workers;
        }
        if let Some(workers) = self.send_workers {
            config.settings.send_workers = workers;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            config.settings.pacing_ms = pacing_ms;
        }
        if self.skip_test_message {
            config.test_recipient = None;
        }
    }

    /// The broadcast text from `--message` or `--message-file`
    pub fn message_text(&self) -> Result<Option<String>, RunError> {
        if let Some(message) = &self.message {
            return Ok(Some(message.clone()));
        }
        match &self.message_file {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .map_err(|e| RunError::Message(format!("{}: {}", path.display(), e))),
            None => Ok(None),
        }
    }
}
