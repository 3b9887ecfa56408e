//! Error types and per-row error statistics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Types of errors that can make a single track row fail.
///
/// This enum categorizes different error conditions for tracking and
/// reporting purposes. A failed row is skipped, never fatal to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RowErrorType {
    /// The input row did not have the expected `lat,lon,date,time` shape.
    MalformedRow,
    /// The elevation request could not be sent or timed out.
    RequestError,
    /// The elevation API answered with a non-success HTTP status.
    StatusError,
    /// The response body was not the expected JSON shape.
    DecodeError,
    /// The response decoded but its `results` array was empty.
    EmptyResults,
}

impl RowErrorType {
    /// Human-readable label used in the end-of-run summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            RowErrorType::MalformedRow => "Malformed input row",
            RowErrorType::RequestError => "Elevation request error",
            RowErrorType::StatusError => "Elevation API status error",
            RowErrorType::DecodeError => "Elevation response decode error",
            RowErrorType::EmptyResults => "Elevation response empty results",
        }
    }
}

/// Per-row error statistics for a fetch run.
///
/// Tracks the count of each error type using atomic counters. All error types
/// are initialized to zero on creation.
pub struct FetchStats {
    errors: HashMap<RowErrorType, AtomicUsize>,
}

impl FetchStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in RowErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        FetchStats { errors }
    }

    /// Increments the counter for `error`.
    pub fn increment(&self, error: RowErrorType) {
        // All RowErrorType variants are initialized in new(), so unwrap() is safe
        self.errors
            .get(&error)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current count for `error`.
    pub fn get_count(&self, error: RowErrorType) -> usize {
        // All RowErrorType variants are initialized in new(), so unwrap() is safe
        self.errors.get(&error).unwrap().load(Ordering::SeqCst)
    }

    /// Logs one line per error type that occurred during the run.
    pub fn log_summary(&self) {
        for error in RowErrorType::iter() {
            let count = self.get_count(error);
            if count > 0 {
                info!("{}: {}", error.as_str(), count);
            }
        }
    }
}

impl Default for FetchStats {
    fn default() -> Self {
        Self::new()
    }
}
