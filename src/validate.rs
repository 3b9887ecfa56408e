//! Bounded-integer argument validation.
//!
//! [`IntRange`] validates that a raw command-line string is an integer within
//! an optional `[min, max]` range. It is wired into clap through small
//! `value_parser` functions (see [`crate::config`]), but is usable standalone.

use thiserror::Error;

/// A malformed or out-of-range argument.
///
/// The message names the active bound(s) being violated, so it can be shown
/// to the user verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InvalidArgument {
    message: String,
}

/// Validates that a raw string argument is an integer within `[min, max]`.
///
/// Either bound may be absent, meaning unbounded in that direction. The
/// configuration is immutable; [`IntRange::parse`] applies it as a
/// predicate+converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntRange {
    min: Option<i64>,
    max: Option<i64>,
}

impl IntRange {
    /// Creates a validator with the given optional bounds.
    pub const fn new(min: Option<i64>, max: Option<i64>) -> Self {
        IntRange { min, max }
    }

    /// Creates a validator accepting any integer in `[min, max]`.
    pub const fn between(min: i64, max: i64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Creates a validator accepting any integer `>= min`.
    pub const fn at_least(min: i64) -> Self {
        Self::new(Some(min), None)
    }

    /// Creates a validator accepting any integer `<= max`.
    pub const fn at_most(max: i64) -> Self {
        Self::new(None, Some(max))
    }

    /// Converts `raw` to an integer and checks it against the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] if `raw` is not an integer or lies outside
    /// a configured bound. The message is determined solely by which bounds
    /// are configured, so parse failures and range failures read the same.
    pub fn parse(&self, raw: &str) -> Result<i64, InvalidArgument> {
        let value: i64 = raw.trim().parse().map_err(|_| self.invalid())?;
        if self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max) {
            return Err(self.invalid());
        }
        Ok(value)
    }

    fn invalid(&self) -> InvalidArgument {
        let message = match (self.min, self.max) {
            (Some(min), Some(max)) => {
                format!("must be an integer in the range [{min}, {max}]")
            }
            (Some(min), None) => format!("must be an integer >= {min}"),
            (None, Some(max)) => format!("must be an integer <= {max}"),
            (None, None) => "must be an integer".to_string(),
        };
        InvalidArgument { message }
    }
}
