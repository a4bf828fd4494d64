//! Logging setup
//!
//! Installs the global `tracing` subscriber. Verbosity follows `RUST_LOG`
//! and falls back to the configured default level.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Where and how to log
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter used when `RUST_LOG` is unset
    pub default_level: String,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
    /// Line format
    pub format: LogFormat,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            file: None,
            format: LogFormat::Text,
        }
    }
}

impl LogOptions {
    /// Builds the filter from `RUST_LOG` or the default level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_level))
    }
}

/// Installs the global subscriber.
///
/// Fails only when the log file cannot be opened. A subscriber that is
/// already installed is left in place.
pub fn init_logging(options: &LogOptions) -> io::Result<()> {
    let (writer, ansi) = match &options.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(options.env_filter())
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    let installed = match options.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = installed {
        tracing::debug!("Logging already initialized: {}", e);
    }
    Ok(())
}
