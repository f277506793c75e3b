//! Instants a token can be generated for, and their conversion into HOTP counters.

use chrono::{DateTime, Utc};

use crate::TotpError;

/// The point in time a token is computed for.
///
/// `Seconds` and `Millis` carry an explicit unit. `Epoch` is a bare integer whose unit is
/// inferred from its length: exactly 10 decimal digits are seconds, exactly 13 are
/// milliseconds, anything else is rejected when the timestamp is resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Timestamp {
    /// Seconds since the Unix epoch.
    Seconds(u64),
    /// Milliseconds since the Unix epoch, truncated to whole seconds.
    Millis(u64),
    /// Seconds or milliseconds since the Unix epoch, told apart by digit count.
    Epoch(u64),
    /// A calendar instant, floored to whole seconds.
    Calendar(DateTime<Utc>),
}

impl Timestamp {
    /// The current system time.
    pub fn now() -> Self {
        Timestamp::Calendar(Utc::now())
    }

    /// Resolve to whole seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// [TotpError::InvalidTimestamp](enum.TotpError.html#variant.InvalidTimestamp) when an
    /// `Epoch` value is neither 10 nor 13 digits long, or when a `Calendar` value lies before
    /// the Unix epoch.
    pub fn unix_seconds(&self) -> Result<u64, TotpError> {
        match *self {
            Timestamp::Seconds(s) => Ok(s),
            Timestamp::Millis(ms) => Ok(ms / 1000),
            Timestamp::Epoch(n) => match decimal_len(n) {
                10 => Ok(n),
                13 => Ok(n / 1000),
                _ => Err(TotpError::InvalidTimestamp(*self)),
            },
            Timestamp::Calendar(dt) => {
                u64::try_from(dt.timestamp()).map_err(|_| TotpError::InvalidTimestamp(*self))
            }
        }
    }

    /// Number of whole `period`s elapsed since the Unix epoch.
    ///
    /// `period` must be non-zero, which [TokenConfig](struct.TokenConfig.html) guarantees.
    pub fn counter(&self, period: u64) -> Result<u64, TotpError> {
        Ok(self.unix_seconds()? / period)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Calendar(dt)
    }
}

impl From<u64> for Timestamp {
    fn from(n: u64) -> Self {
        Timestamp::Epoch(n)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Seconds(s) => write!(f, "{}s", s),
            Timestamp::Millis(ms) => write!(f, "{}ms", ms),
            Timestamp::Epoch(n) => write!(f, "{}", n),
            Timestamp::Calendar(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

fn decimal_len(mut n: u64) -> u32 {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

#[cfg(feature = "serde_support")]
mod serde_impl {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Timestamp;

    /// Wire form: an integer is an `Epoch`, a string an RFC 3339 calendar instant.
    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Epoch(u64),
        Calendar(DateTime<Utc>),
    }

    impl Serialize for Timestamp {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match *self {
                Timestamp::Seconds(n) | Timestamp::Millis(n) | Timestamp::Epoch(n) => {
                    Repr::Epoch(n).serialize(serializer)
                }
                Timestamp::Calendar(dt) => Repr::Calendar(dt).serialize(serializer),
            }
        }
    }

    impl<'de> Deserialize<'de> for Timestamp {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match Repr::deserialize(deserializer)? {
                Repr::Epoch(n) => Timestamp::Epoch(n),
                Repr::Calendar(dt) => Timestamp::Calendar(dt),
            })
        }
    }
}
