//! One-time process initialization.
//!
//! This module provides functions to initialize the diagnostic logger and the
//! HTTP client used for elevation requests.

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;
