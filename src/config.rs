//! Settings tokens are computed with, and their validation.

use crate::{Algorithm, ConfigError, Timestamp};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_PERIOD: u64 = 30;
pub(crate) const DEFAULT_DIGITS: usize = 6;

pub(crate) fn assert_period(period: u64) -> Result<(), ConfigError> {
    if period == 0 {
        tracing::debug!(period, "rejected token period");
        Err(ConfigError::Period(period))
    } else {
        Ok(())
    }
}

pub(crate) fn assert_digits(digits: usize) -> Result<(), ConfigError> {
    if digits == 0 {
        tracing::debug!(digits, "rejected token digit count");
        Err(ConfigError::Digits(digits))
    } else {
        Ok(())
    }
}

/// Set of options a [TokenGenerator](struct.TokenGenerator.html) computes tokens with.
///
/// A config is immutable. Each `with_*` method returns a copy with one field replaced, so a
/// config can be shared between threads and "changed" without affecting other holders.
///
/// # Example
/// ```
/// use totp_token::{Algorithm, Timestamp, TokenConfig};
///
/// let config = TokenConfig::default()
///     .with_algorithm(Algorithm::SHA256)
///     .with_period(60)
///     .unwrap()
///     .with_digits(8)
///     .unwrap()
///     .with_timestamp(Timestamp::Seconds(1234567890));
///
/// assert_eq!(config.period(), 60);
/// assert_eq!(config.digits(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(try_from = "RawConfig"))]
pub struct TokenConfig {
    /// Hash function the HMAC is built on. SHA-1 is the default and the only one every
    /// authenticator app supports.
    algorithm: Algorithm,
    /// Duration in seconds of a counter step. Never zero.
    period: u64,
    /// Number of decimal digits kept from the truncated value. Never zero.
    digits: usize,
    /// Instant tokens are computed for.
    timestamp: Timestamp,
}

impl TokenConfig {
    /// Create a config from explicit values.
    ///
    /// # Errors
    ///
    /// will return a [ConfigError](enum.ConfigError.html) when
    /// - `period` is 0
    /// - `digits` is 0
    pub fn new(
        algorithm: Algorithm,
        period: u64,
        digits: usize,
        timestamp: Timestamp,
    ) -> Result<TokenConfig, ConfigError> {
        assert_period(period)?;
        assert_digits(digits)?;
        Ok(TokenConfig {
            algorithm,
            period,
            digits,
            timestamp,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> TokenConfig {
        TokenConfig { algorithm, ..self }
    }

    pub fn with_period(self, period: u64) -> Result<TokenConfig, ConfigError> {
        assert_period(period)?;
        Ok(TokenConfig { period, ..self })
    }

    pub fn with_digits(self, digits: usize) -> Result<TokenConfig, ConfigError> {
        assert_digits(digits)?;
        Ok(TokenConfig { digits, ..self })
    }

    pub fn with_timestamp(self, timestamp: impl Into<Timestamp>) -> TokenConfig {
        TokenConfig {
            timestamp: timestamp.into(),
            ..self
        }
    }
}

/// SHA-1, 30 seconds, 6 digits, at the time the config is created.
impl Default for TokenConfig {
    fn default() -> Self {
        TokenConfig {
            algorithm: Algorithm::default(),
            period: DEFAULT_PERIOD,
            digits: DEFAULT_DIGITS,
            timestamp: Timestamp::now(),
        }
    }
}

/// Every field is optional, anything else is refused.
#[cfg(feature = "serde_support")]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    algorithm: Option<Algorithm>,
    period: Option<u64>,
    digits: Option<usize>,
    timestamp: Option<Timestamp>,
}

#[cfg(feature = "serde_support")]
impl TryFrom<RawConfig> for TokenConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        TokenConfig::new(
            raw.algorithm.unwrap_or_default(),
            raw.period.unwrap_or(DEFAULT_PERIOD),
            raw.digits.unwrap_or(DEFAULT_DIGITS),
            raw.timestamp.unwrap_or_else(Timestamp::now),
        )
    }
}
