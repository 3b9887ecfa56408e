//! depth_finder library: elevation fetching for GPS tracks plus small
//! network-facing CLI utilities.
//!
//! The crate has two independent halves:
//!
//! - [`run_fetch`] reads a track file of `lat,lon,date,time` rows, queries an
//!   elevation API once per row with fixed pacing, and writes an augmented
//!   `lat,lon,date,time,elevation` file next to the input.
//! - The utility modules ([`net`], [`status_log`], [`validate`]) provide an
//!   interface-listing parser, an IPv4 validator, a connect-with-retry helper,
//!   a leveled track logger, and a bounded-integer argument validator. They
//!   are usable independently of the fetcher.
//!
//! # Example
//!
//! ```no_run
//! use depth_finder::{run_fetch, Config};
//! use clap::Parser;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::parse_from(["depth_finder", "track", "my-api-key"]);
//!
//! let report = run_fetch(config).await?;
//! println!("Processed {} rows: {} succeeded, {} failed",
//!          report.total_rows, report.successful, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The fetcher requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call it from within an async context. The utility modules
//! are synchronous apart from [`net::connect_with_retry`], which awaits its
//! delay schedule.

#![warn(missing_docs)]

pub mod config;
pub mod elevation;
pub mod error_handling;
pub mod initialization;
pub mod net;
pub mod status_log;
pub mod validate;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use elevation::{run_fetch, CoordinateRecord, ElevationClient, ElevationError, FetchReport};
pub use net::{
    connect_with_retry, interface_devices, is_valid_ipv4, parse_interface_listing,
    ConnectRetryError, RetryPolicy,
};
pub use status_log::{Severity, StatusLogger};
pub use validate::{IntRange, InvalidArgument};
