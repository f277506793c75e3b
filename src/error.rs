use thiserror::Error;

use crate::{Algorithm, Timestamp};

/// Reasons a token could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotpError {
    /// The key was the empty string.
    #[error("Empty base32 key!")]
    EmptyKey,
    /// The key holds characters outside `A-Z2-7`, once trailing `=` are stripped.
    #[error("Invalid base32 key!")]
    InvalidKey,
    /// The timestamp could not be resolved to Unix seconds.
    #[error("Invalid timestamp! ({0})")]
    InvalidTimestamp(Timestamp),
    /// The HMAC primitive refused the key, or produced a digest too short to truncate.
    #[error("Could not compute HMAC with {0}")]
    Hmac(Algorithm),
}

/// A [TokenConfig](struct.TokenConfig.html) field failed its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Period must be a positive number of seconds, not {0}")]
    Period(u64),
    #[error("Digits must be a positive number, not {0}")]
    Digits(usize),
    #[error("Algorithm can only be one of SHA-1, SHA-224, SHA-256, SHA-384, SHA-512, SHA3-224, SHA3-256, SHA3-384 or SHA3-512, not \"{0}\"")]
    Algorithm(String),
}
