//! Elevation API client.
//!
//! Request shape: `GET <endpoint>?locations=<lat>,<lon>&key=<key>`.
//! Response shape: `{ "results": [ { "elevation": <number>, ... } ], ... }`.
//! The service is treated as opaque; only `results[0].elevation` is read.

use serde::Deserialize;
use url::Url;

use crate::error_handling::RowErrorType;

/// Top-level elevation API response body.
#[derive(Debug, Deserialize)]
pub struct ElevationResponse {
    /// Result objects, one per requested location.
    pub results: Vec<ElevationResult>,
    /// Service status string (`"OK"` on success); informational only.
    #[serde(default)]
    pub status: Option<String>,
}

/// One result object from the elevation API.
#[derive(Debug, Deserialize)]
pub struct ElevationResult {
    /// Elevation in meters relative to sea level.
    pub elevation: f64,
}

/// A single elevation lookup failed.
///
/// Each variant corresponds to one stage of the round trip, so failures can
/// be counted by type in the end-of-run summary.
#[derive(Debug, thiserror::Error)]
pub enum ElevationError {
    /// The request could not be sent or timed out.
    #[error("elevation request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("elevation API returned an error status: {0}")]
    Status(#[source] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("elevation response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    /// The response decoded but carried no results.
    #[error("elevation response contained no results")]
    EmptyResults,
}

impl ElevationError {
    /// The statistics bucket this failure belongs to.
    pub(crate) fn error_type(&self) -> RowErrorType {
        match self {
            ElevationError::Request(_) => RowErrorType::RequestError,
            ElevationError::Status(_) => RowErrorType::StatusError,
            ElevationError::Decode(_) => RowErrorType::DecodeError,
            ElevationError::EmptyResults => RowErrorType::EmptyResults,
        }
    }
}

/// Client for a JSON-over-HTTPS elevation service.
#[derive(Debug, Clone)]
pub struct ElevationClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl ElevationClient {
    /// Creates a client for `endpoint`, authenticating with `api_key`.
    pub fn new(client: reqwest::Client, endpoint: Url, api_key: String) -> Self {
        ElevationClient {
            client,
            endpoint,
            api_key,
        }
    }

    /// Looks up the elevation for one coordinate.
    ///
    /// Latitude and longitude are passed through verbatim; the service does
    /// its own numeric validation and reports problems via its status code.
    ///
    /// # Errors
    ///
    /// Returns an [`ElevationError`] naming the failed stage of the round
    /// trip. The key is sent as a query parameter and never logged.
    pub async fn lookup(&self, latitude: &str, longitude: &str) -> Result<f64, ElevationError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("locations", format!("{latitude},{longitude}")),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(ElevationError::Request)?
            .error_for_status()
            .map_err(ElevationError::Status)?;

        let body: ElevationResponse = response.json().await.map_err(ElevationError::Decode)?;
        body.results
            .first()
            .map(|result| result.elevation)
            .ok_or(ElevationError::EmptyResults)
    }
}
