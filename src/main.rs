//! directory-mailer - paced batch client for the client directory
//!
//! Loads `.env`, parses flags, sets up logging and runs the pipeline.

use clap::Parser;
use directory_mailer::runner::{self, RunOptions};
use directory_mailer::utils::logging::init_logging;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let options = RunOptions::parse();

    if let Err(e) = init_logging(&options.log_options()) {
        eprintln!("Error: cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    match runner::run(options).await {
        Ok(report) => {
            info!(
                listed = report.listed,
                retained = report.retained,
                details = report.details.succeeded,
                detail_failures = report.details.failed,
                "Finished in {:?}",
                report.elapsed
            );
            if let Some(sent) = report.broadcast {
                info!(sent = sent.succeeded, failed = sent.failed, "Broadcast summary");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
