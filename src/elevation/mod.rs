//! Elevation fetching for GPS track files.
//!
//! [`run_fetch`] reads `lat,lon,date,time` rows from the input track file,
//! queries the elevation API once per row with fixed pacing, and appends the
//! augmented `lat,lon,date,time,elevation` rows to the output file. A row
//! that fails to parse, fetch, or decode is skipped and logged; the run keeps
//! going and the failure is reflected in the returned [`FetchReport`].

mod api;
mod record;

pub use api::{ElevationClient, ElevationError, ElevationResponse, ElevationResult};
pub use record::{CoordinateRecord, RecordParseError};

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::warn;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::{Config, API_KEY_ENV};
use crate::error_handling::{FetchStats, RowErrorType};
use crate::initialization::init_client;
use crate::status_log::StatusLogger;

/// Results of a completed fetch run.
///
/// Contains summary statistics and metadata about the completed run.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Number of non-empty input rows seen
    pub total_rows: usize,
    /// Number of rows written with an elevation
    pub successful: usize,
    /// Number of rows skipped (malformed or failed lookup)
    pub failed: usize,
    /// Path of the augmented output file
    pub output_path: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs an elevation fetch with the provided configuration.
///
/// This is the main entry point for the library. It reads track rows from
/// `<base>.txt`, looks up each row's elevation, and writes `<base>_depth.txt`
/// (overwriting any existing file). Requests are paced by `config.pace_ms`
/// between consecutive calls; there is no delay before the first request or
/// after the last.
///
/// Per-row progress and the completion line are emitted through a
/// [`StatusLogger`] at DISPLAY severity, mirrored to `config.track_log` when
/// set.
///
/// # Errors
///
/// Returns an error only for whole-run problems: no API key resolvable, the
/// input file cannot be opened or read, the output file cannot be written, or
/// the HTTP client cannot be built. Individual row failures are counted in
/// the report instead (`failed > 0` maps to exit code 2 in the binary).
pub async fn run_fetch(config: Config) -> Result<FetchReport> {
    let started = Instant::now();

    let api_key = config.resolve_api_key().with_context(|| {
        format!("no API key: pass it as the second argument or set {API_KEY_ENV}")
    })?;

    let logger = StatusLogger::new(config.verbosity);
    let track_log = config.track_log.as_deref();
    let client = init_client(config.timeout_seconds)?;
    let api = ElevationClient::new(client, config.endpoint.clone(), api_key);
    let stats = FetchStats::new();

    let input_path = config.input_path();
    let output_path = config.output_path();
    let input = File::open(&input_path)
        .await
        .with_context(|| format!("failed to open input file {}", input_path.display()))?;
    let mut output = File::create(&output_path)
        .await
        .with_context(|| format!("failed to create output file {}", output_path.display()))?;

    let mut lines = BufReader::new(input).lines();
    let mut total_rows = 0usize;
    let mut successful = 0usize;
    let mut failed = 0usize;
    let mut requests_made = 0usize;

    while let Some(row) = lines
        .next_line()
        .await
        .with_context(|| format!("failed to read input file {}", input_path.display()))?
    {
        if row.trim().is_empty() {
            continue;
        }
        total_rows += 1;

        let mut record = match CoordinateRecord::parse(&row) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping row {total_rows}: {e}");
                stats.increment(RowErrorType::MalformedRow);
                failed += 1;
                continue;
            }
        };

        // Pace between consecutive requests to respect service rate limits
        if requests_made > 0 {
            tokio::time::sleep(Duration::from_millis(config.pace_ms)).await;
        }
        requests_made += 1;

        match api.lookup(&record.latitude, &record.longitude).await {
            Ok(elevation) => {
                record.elevation = Some(elevation);
                logger.display(
                    &format!(
                        "At ({}, {}) elevation is: {}",
                        record.latitude, record.longitude, elevation
                    ),
                    track_log,
                );
                if let Some(line) = record.output_line() {
                    output
                        .write_all(format!("{line}\n").as_bytes())
                        .await
                        .with_context(|| {
                            format!("failed to write output file {}", output_path.display())
                        })?;
                }
                successful += 1;
            }
            Err(e) => {
                warn!(
                    "skipping row {total_rows} ({}, {}): {e}",
                    record.latitude, record.longitude
                );
                stats.increment(e.error_type());
                failed += 1;
            }
        }
    }

    output
        .flush()
        .await
        .with_context(|| format!("failed to write output file {}", output_path.display()))?;

    stats.log_summary();
    logger.display(
        &format!("Output finished with {successful} depths discovered"),
        track_log,
    );

    Ok(FetchReport {
        total_rows,
        successful,
        failed,
        output_path,
        elapsed_seconds: started.elapsed().as_secs_f64(),
    })
}
