//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::USER_AGENT;
use crate::error_handling::InitializationError;

/// Builds the HTTP client used for all elevation requests.
///
/// The client is built once per run with a per-request timeout and a
/// crate-identifying User-Agent.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the underlying TLS
/// backend cannot be initialized.
pub fn init_client(timeout_seconds: u64) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
