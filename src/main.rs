//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `spf_squash` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Writing the squashed record to stdout
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use spf_squash::initialization::init_logger_with;
use spf_squash::{run_squash, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Logs go to stderr; stdout carries only the record
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_squash(&config).await {
        Ok(report) => {
            let rendered = report
                .render(config.format)
                .context("Failed to render squash report")?;
            println!("{rendered}");
            Ok(())
        }
        Err(e) => {
            eprintln!("spf_squash error: {:#}", e);
            process::exit(1);
        }
    }
}
