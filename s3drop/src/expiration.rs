//! Share link expiration parsing

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;
use thiserror::Error;

/// Longest lifetime a SigV4 presigned URL may have
pub const MAX_EXPIRATION_HOURS: u32 = 7 * 24;

const DEFAULT_EXPIRATION_HOURS: u32 = 24;

/// Errors from parsing an expiration such as `24h` or `2d`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpirationError {
    /// The value is not a whole number of hours or days
    #[error("invalid expiration '{0}': use hours or days, e.g. 24h, 48h, 2d")]
    Invalid(String),

    /// Links must live for at least an hour
    #[error("expiration must be at least 1 hour")]
    Zero,

    /// The value exceeds the presigning limit
    #[error("expiration of {0} hours exceeds the maximum of {MAX_EXPIRATION_HOURS} hours (7d)")]
    TooLong(u64),
}

/// How long a share link stays valid, in whole hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expiration {
    hours: u32,
}

impl Expiration {
    /// Creates an expiration of `hours`
    ///
    /// # Errors
    ///
    /// Returns `ExpirationError::Zero` or `ExpirationError::TooLong` outside 1..=168 hours
    pub fn from_hours(hours: u64) -> Result<Self, ExpirationError> {
        if hours == 0 {
            return Err(ExpirationError::Zero);
        }
        match u32::try_from(hours) {
            Ok(hours) if hours <= MAX_EXPIRATION_HOURS => Ok(Self { hours }),
            _ => Err(ExpirationError::TooLong(hours)),
        }
    }

    /// Number of hours the link is valid for
    #[must_use]
    pub const fn hours(self) -> u32 {
        self.hours
    }

    /// Lifetime as a standard duration
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.hours as u64 * 3600)
    }

    /// Lifetime as a chrono delta
    #[must_use]
    pub fn as_time_delta(self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.hours))
    }
}

impl Default for Expiration {
    fn default() -> Self {
        Self {
            hours: DEFAULT_EXPIRATION_HOURS,
        }
    }
}

impl FromStr for Expiration {
    type Err = ExpirationError;

    /// Parses `<n>h`, `<n>d` or a bare number of hours, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        let invalid = || ExpirationError::Invalid(s.to_string());

        let (digits, multiplier) = if let Some(days) = value.strip_suffix('d') {
            (days, 24)
        } else if let Some(hours) = value.strip_suffix('h') {
            (hours, 1)
        } else {
            (value.as_str(), 1)
        };

        let digits = digits.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let amount: u64 = digits.parse().map_err(|_| invalid())?;
        let hours = amount.checked_mul(multiplier).ok_or_else(invalid)?;

        Self::from_hours(hours)
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours)
    }
}
