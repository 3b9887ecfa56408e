//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `depth_finder` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use depth_finder::initialization::init_logger_with;
use depth_finder::{run_fetch, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting ELEVATION_API_KEY in .env without exporting it manually
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize the diagnostic logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_fetch(config).await {
        Ok(report) => {
            // Terminal bell marks the end of a run that may have taken a while
            println!(
                "\u{0007}✅ Processed {} row{} ({} succeeded, {} failed) in {:.1}s",
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.successful,
                report.failed,
                report.elapsed_seconds
            );
            println!("Elevations saved in {}", report.output_path.display());
            if report.failed > 0 {
                process::exit(2);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("depth_finder error: {:#}", e);
            process::exit(1);
        }
    }
}
