//! Configuration constants (used as defaults).

/// Default elevation API endpoint.
///
/// The request shape is `GET <endpoint>?locations=<lat>,<lon>&key=<key>` and
/// the response carries `results[0].elevation`. Overridable via `--endpoint`,
/// which is also how the integration tests point the fetcher at a stub server.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/elevation/json";

/// Environment variable consulted for the API key when it is not passed on
/// the command line. Never embedded in source as a default.
pub const API_KEY_ENV: &str = "ELEVATION_API_KEY";

/// Default delay between consecutive API requests in milliseconds.
///
/// The elevation service rate-limits aggressively; one request per second
/// keeps a long track import under the free-tier quota.
pub const DEFAULT_PACE_MS: u64 = 1000;

/// Upper bound accepted for `--pace-ms`.
pub const MAX_PACE_MS: i64 = 60_000;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default track logger verbosity (most verbose).
pub const DEFAULT_VERBOSITY: u8 = 3;

/// Highest track logger verbosity accepted for `--verbosity`.
pub const MAX_VERBOSITY: i64 = 3;

/// Extension expected on the input track file.
pub const INPUT_EXTENSION: &str = "txt";

/// Suffix inserted before the extension to name the output file.
pub const OUTPUT_SUFFIX: &str = "_depth";

/// User-Agent header value for elevation API requests.
pub const USER_AGENT: &str = concat!("depth_finder/", env!("CARGO_PKG_VERSION"));

/// Default delay between connection attempts in [`crate::net::RetryPolicy`].
pub const CONNECT_RETRY_DELAY_SECS: u64 = 10;
