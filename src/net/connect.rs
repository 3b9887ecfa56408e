//! Connect-with-retry helper.
//!
//! [`connect_with_retry`] drives a fallible connect attempt until it
//! succeeds, logging a warning and waiting out a [`RetryPolicy`] delay after
//! each failure. The original fixed 10-second/forever behavior is the default
//! policy; the delay schedule and attempt budget are configurable.

use std::io;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tokio_retry::strategy::{ExponentialBackoff, FixedInterval};

use crate::config::CONNECT_RETRY_DELAY_SECS;
use crate::status_log::StatusLogger;

/// Delay schedule and attempt budget for [`connect_with_retry`].
///
/// The default policy retries forever with a fixed 10-second delay. An
/// exponential schedule is selected by configuring a backoff factor.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    delay: Duration,
    backoff_factor: Option<u64>,
    max_delay: Option<Duration>,
    max_attempts: Option<usize>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::fixed(Duration::from_secs(CONNECT_RETRY_DELAY_SECS))
    }
}

impl RetryPolicy {
    /// A fixed-interval schedule with no attempt limit.
    pub fn fixed(delay: Duration) -> Self {
        RetryPolicy {
            delay,
            backoff_factor: None,
            max_delay: None,
            max_attempts: None,
        }
    }

    /// Switches to an exponential schedule derived from the base delay and
    /// scaled by `factor`.
    pub fn with_backoff_factor(mut self, factor: u64) -> Self {
        self.backoff_factor = Some(factor);
        self
    }

    /// Caps the delay of an exponential schedule.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Limits the number of connect attempts.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Maximum number of connect attempts, if limited.
    pub fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }

    // The post-failure delay schedule as an iterator.
    fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send> {
        let base_ms = self.delay.as_millis().try_into().unwrap_or(u64::MAX);
        match self.backoff_factor {
            Some(factor) => {
                let mut backoff = ExponentialBackoff::from_millis(base_ms).factor(factor);
                if let Some(max_delay) = self.max_delay {
                    backoff = backoff.max_delay(max_delay);
                }
                Box::new(backoff)
            }
            None => Box::new(FixedInterval::new(self.delay)),
        }
    }
}

/// Why [`connect_with_retry`] gave up.
#[derive(Debug, Error)]
pub enum ConnectRetryError {
    /// The user interrupted the wait; the enclosing process must terminate
    /// with a non-zero status.
    #[error("interrupted while waiting to retry")]
    Interrupted,

    /// The policy's attempt budget ran out.
    #[error("gave up after {attempts} connect attempts: {last}")]
    Exhausted {
        /// Number of attempts made.
        attempts: usize,
        /// The error returned by the final attempt.
        #[source]
        last: io::Error,
    },
}

/// Repeatedly invokes `connect` until it succeeds.
///
/// After each failed attempt a warning naming the raw error code is logged
/// through `logger` (and appended to `logfile` when supplied), and the next
/// [`RetryPolicy`] delay is waited out. Success returns immediately with no
/// trailing delay.
///
/// `connect` is the socket seam: any `FnMut() -> io::Result<T>`, typically a
/// closure wrapping a non-blocking connect call on a socket.
///
/// # Errors
///
/// Returns [`ConnectRetryError::Interrupted`] if Ctrl-C arrives during the
/// wait (after logging the termination warning); callers must exit the
/// process with a non-zero status. Returns [`ConnectRetryError::Exhausted`]
/// when a configured `max_attempts` budget runs out.
pub async fn connect_with_retry<T, F>(
    logger: &StatusLogger,
    mut connect: F,
    policy: &RetryPolicy,
    logfile: Option<&Path>,
) -> Result<T, ConnectRetryError>
where
    F: FnMut() -> io::Result<T>,
{
    let mut delays = policy.delays();
    let mut attempts = 0usize;

    loop {
        attempts += 1;
        match connect() {
            Ok(connection) => return Ok(connection),
            Err(e) => {
                logger.warn(
                    &format!(
                        "Unable to connect to server (err: {}). Delaying before retry.",
                        error_code(&e)
                    ),
                    logfile,
                );

                if policy.max_attempts.is_some_and(|max| attempts >= max) {
                    return Err(ConnectRetryError::Exhausted { attempts, last: e });
                }

                let delay = delays.next().unwrap_or(policy.delay);
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = tokio::signal::ctrl_c() => {
                        logger.warn("Program termination via user interrupt.", logfile);
                        return Err(ConnectRetryError::Interrupted);
                    }
                }
            }
        }
    }
}

// Raw OS error code when available, io::ErrorKind otherwise.
fn error_code(e: &io::Error) -> String {
    e.raw_os_error()
        .map_or_else(|| e.kind().to_string(), |code| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn refused() -> io::Error {
        // 111 = ECONNREFUSED
        io::Error::from_raw_os_error(111)
    }

    #[tokio::test]
    async fn test_returns_on_first_success() {
        let logger = StatusLogger::new(0);
        let policy = RetryPolicy::fixed(Duration::from_millis(1));

        let result = connect_with_retry(&logger, || Ok("connected"), &policy, None).await;
        assert_eq!(result.unwrap(), "connected");
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let logger = StatusLogger::new(0);
        let policy = RetryPolicy::fixed(Duration::from_millis(1));
        let attempts = Cell::new(0usize);

        let result = connect_with_retry(
            &logger,
            || {
                attempts.set(attempts.get() + 1);
                if attempts.get() <= 2 {
                    Err(refused())
                } else {
                    Ok(attempts.get())
                }
            },
            &policy,
            None,
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.get(), 3);
    }

    #[tokio::test]
    async fn test_exhausts_attempt_budget() {
        let logger = StatusLogger::new(0);
        let policy = RetryPolicy::fixed(Duration::from_millis(1)).with_max_attempts(2);
        let attempts = Cell::new(0usize);

        let result: Result<(), _> = connect_with_retry(
            &logger,
            || {
                attempts.set(attempts.get() + 1);
                Err(refused())
            },
            &policy,
            None,
        )
        .await;

        assert_eq!(attempts.get(), 2);
        match result {
            Err(ConnectRetryError::Exhausted { attempts, .. }) => assert_eq!(attempts, 2),
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_exponential_schedule_grows() {
        let policy = RetryPolicy::fixed(Duration::from_millis(10))
            .with_backoff_factor(2)
            .with_max_delay(Duration::from_secs(1));
        let delays: Vec<Duration> = policy.delays().take(4).collect();

        assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(1)));
    }

    #[test]
    fn test_fixed_schedule_is_constant() {
        let policy = RetryPolicy::fixed(Duration::from_secs(10));
        let delays: Vec<Duration> = policy.delays().take(3).collect();
        assert_eq!(delays, vec![Duration::from_secs(10); 3]);
    }
}
