//! This library computes time-based one-time passwords ([rfc-6238](https://tools.ietf.org/html/rfc6238))
//! from base32 encoded secrets, with HMAC built on any of the SHA-1, SHA-2 and SHA-3 hash functions.
//!
//! Be aware that most authenticator apps only implement `SHA-1`, and some will silently fall back
//! to it when given another algorithm, which makes their codes diverge from the ones computed here.
//!
//! Tokens keep the **last** `digits` decimal digits of the truncated HOTP value and are never
//! zero padded: in the rare case the value itself has fewer digits, the token is shorter than
//! requested.
//!
//! # Examples
//!
//! ```rust
//! use totp_token::{Algorithm, Timestamp, TokenConfig, TokenGenerator};
//!
//! let config = TokenConfig::new(Algorithm::SHA1, 30, 6, Timestamp::Epoch(1675324259)).unwrap();
//! let generator = TokenGenerator::new(config);
//! assert_eq!(generator.generate("JBSWY3DPEHPK3PXP").unwrap(), "680081");
//!
//! // Same generator, next period.
//! let generator = generator.with_timestamp(Timestamp::Epoch(1675324260));
//! assert_eq!(generator.generate("JBSWY3DPEHPK3PXP").unwrap(), "858066");
//! ```
//!
//! ```rust
//! use totp_token::TokenGenerator;
//!
//! let generator = TokenGenerator::default();
//! let token = generator.generate_current("JBSWY3DPEHPK3PXP").unwrap();
//! println!("{}", token);
//! ```

mod config;
mod error;
mod hotp;
mod key;
mod timestamp;

pub use config::TokenConfig;
pub use error::{ConfigError, TotpError};
pub use hotp::{format_token, hotp, truncate};
pub use key::{decode, validate, KeyBytes};
pub use timestamp::Timestamp;

use constant_time_eq::constant_time_eq;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use core::fmt;
use std::str::FromStr;

use hmac::digest::KeyInit;
use hmac::Mac;

type HmacSha1 = hmac::Hmac<sha1::Sha1>;
type HmacSha224 = hmac::Hmac<sha2::Sha224>;
type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha384 = hmac::Hmac<sha2::Sha384>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;
type HmacSha3_224 = hmac::Hmac<sha3::Sha3_224>;
type HmacSha3_256 = hmac::Hmac<sha3::Sha3_256>;
type HmacSha3_384 = hmac::Hmac<sha3::Sha3_384>;
type HmacSha3_512 = hmac::Hmac<sha3::Sha3_512>;

/// Hash function the HMAC of a token is built on.
///
/// [rfc-6238](https://tools.ietf.org/html/rfc6238#appendix-A) only names SHA-1, SHA-256 and
/// SHA-512; the remaining SHA-2 and SHA-3 variants are computed the same way.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Algorithm {
    #[default]
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA-1"))]
    SHA1,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA-224"))]
    SHA224,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA-256"))]
    SHA256,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA-384"))]
    SHA384,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA-512"))]
    SHA512,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA3-224"))]
    SHA3_224,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA3-256"))]
    SHA3_256,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA3-384"))]
    SHA3_384,
    #[cfg_attr(feature = "serde_support", serde(rename = "SHA3-512"))]
    SHA3_512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::SHA1,
        Algorithm::SHA224,
        Algorithm::SHA256,
        Algorithm::SHA384,
        Algorithm::SHA512,
        Algorithm::SHA3_224,
        Algorithm::SHA3_256,
        Algorithm::SHA3_384,
        Algorithm::SHA3_512,
    ];

    /// Canonical name, as accepted by [FromStr](#impl-FromStr-for-Algorithm).
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::SHA1 => "SHA-1",
            Algorithm::SHA224 => "SHA-224",
            Algorithm::SHA256 => "SHA-256",
            Algorithm::SHA384 => "SHA-384",
            Algorithm::SHA512 => "SHA-512",
            Algorithm::SHA3_224 => "SHA3-224",
            Algorithm::SHA3_256 => "SHA3-256",
            Algorithm::SHA3_384 => "SHA3-384",
            Algorithm::SHA3_512 => "SHA3-512",
        }
    }

    fn hash<M>(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, TotpError>
    where
        M: Mac + KeyInit,
    {
        let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| TotpError::Hmac(*self))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// HMAC of `data` keyed with `key`.
    pub fn sign(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, TotpError> {
        match self {
            Algorithm::SHA1 => self.hash::<HmacSha1>(key, data),
            Algorithm::SHA224 => self.hash::<HmacSha224>(key, data),
            Algorithm::SHA256 => self.hash::<HmacSha256>(key, data),
            Algorithm::SHA384 => self.hash::<HmacSha384>(key, data),
            Algorithm::SHA512 => self.hash::<HmacSha512>(key, data),
            Algorithm::SHA3_224 => self.hash::<HmacSha3_224>(key, data),
            Algorithm::SHA3_256 => self.hash::<HmacSha3_256>(key, data),
            Algorithm::SHA3_384 => self.hash::<HmacSha3_384>(key, data),
            Algorithm::SHA3_512 => self.hash::<HmacSha3_512>(key, data),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| ConfigError::Algorithm(s.to_string()))
    }
}

/// TokenGenerator computes tokens for base32 keys according to its [TokenConfig](struct.TokenConfig.html).
///
/// The generator is an immutable value: changing a setting produces a new generator, and a
/// generator can be shared between threads without synchronization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(transparent))]
pub struct TokenGenerator {
    config: TokenConfig,
}

impl fmt::Display for TokenGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; period: {}; alg: {}; timestamp: {}",
            self.config.digits(),
            self.config.period(),
            self.config.algorithm(),
            self.config.timestamp(),
        )
    }
}

impl From<TokenConfig> for TokenGenerator {
    fn from(config: TokenConfig) -> Self {
        TokenGenerator::new(config)
    }
}

impl TokenGenerator {
    /// Will create a new generator using the given [TokenConfig](struct.TokenConfig.html)
    ///
    /// ```rust
    /// use totp_token::{TokenConfig, TokenGenerator};
    /// let generator = TokenGenerator::new(TokenConfig::default().with_digits(8).unwrap());
    /// ```
    pub fn new(config: TokenConfig) -> TokenGenerator {
        TokenGenerator { config }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    pub fn with_config(self, config: TokenConfig) -> TokenGenerator {
        TokenGenerator { config }
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> TokenGenerator {
        self.with_config(self.config.with_algorithm(algorithm))
    }

    pub fn with_period(self, period: u64) -> Result<TokenGenerator, ConfigError> {
        Ok(self.with_config(self.config.with_period(period)?))
    }

    pub fn with_digits(self, digits: usize) -> Result<TokenGenerator, ConfigError> {
        Ok(self.with_config(self.config.with_digits(digits)?))
    }

    pub fn with_timestamp(self, timestamp: impl Into<Timestamp>) -> TokenGenerator {
        self.with_config(self.config.with_timestamp(timestamp))
    }

    /// Will generate a token for `key` at the configured timestamp
    ///
    /// `key` is base32, case-insensitive, with optional trailing `=` padding.
    ///
    /// # Errors
    ///
    /// - [TotpError::EmptyKey](enum.TotpError.html#variant.EmptyKey) if `key` is empty
    /// - [TotpError::InvalidKey](enum.TotpError.html#variant.InvalidKey) if `key` isn't base32
    /// - [TotpError::InvalidTimestamp](enum.TotpError.html#variant.InvalidTimestamp) if the
    ///   configured timestamp can't be resolved
    pub fn generate(&self, key: &str) -> Result<String, TotpError> {
        self.generate_at(key, self.config.timestamp())
    }

    /// Will generate a token for `key` at `timestamp`, ignoring the configured one
    pub fn generate_at(
        &self,
        key: &str,
        timestamp: impl Into<Timestamp>,
    ) -> Result<String, TotpError> {
        let key = key::decode(key)?;
        let counter = timestamp.into().counter(self.config.period())?;
        let token = self.token(&key, counter)?;
        tracing::trace!(
            algorithm = %self.config.algorithm(),
            period = self.config.period(),
            digits = self.config.digits(),
            counter,
            "generated token"
        );
        Ok(token)
    }

    /// Generate a token from the current system time
    pub fn generate_current(&self, key: &str) -> Result<String, TotpError> {
        self.generate_at(key, Timestamp::now())
    }

    fn token(&self, key: &KeyBytes, counter: u64) -> Result<String, TotpError> {
        let value = hotp::hotp(key, counter, self.config.algorithm())?;
        Ok(hotp::format_token(value, self.config.digits()))
    }

    /// Will check if `token` is valid for `key` at the configured timestamp.
    ///
    /// `skew` is the number of periods accepted on each side of the current one, to account
    /// for clock drift and network delay. 1 is the value recommended by
    /// [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2).
    pub fn check(&self, key: &str, token: &str, skew: u64) -> Result<bool, TotpError> {
        let key = key::decode(key)?;
        let counter = self.config.timestamp().counter(self.config.period())?;
        let mut valid = false;
        for step in counter.saturating_sub(skew)..=counter.saturating_add(skew) {
            if constant_time_eq(self.token(&key, step)?.as_bytes(), token.as_bytes()) {
                valid = true;
                break;
            }
        }
        tracing::trace!(
            algorithm = %self.config.algorithm(),
            period = self.config.period(),
            counter,
            skew,
            valid,
            "checked token"
        );
        Ok(valid)
    }

    /// Returns the timestamp of the first second of the period following the configured timestamp
    ///
    /// # Errors
    ///
    /// [TotpError::InvalidTimestamp](enum.TotpError.html#variant.InvalidTimestamp) if the
    /// configured timestamp can't be resolved, or if the next period starts past `u64::MAX`
    pub fn next_step(&self) -> Result<u64, TotpError> {
        let timestamp = self.config.timestamp();
        let counter = timestamp.counter(self.config.period())?;
        counter
            .checked_add(1)
            .and_then(|next| next.checked_mul(self.config.period()))
            .ok_or(TotpError::InvalidTimestamp(timestamp))
    }

    /// Give the ttl (in seconds) of the token at the configured timestamp
    pub fn ttl(&self) -> Result<u64, TotpError> {
        let seconds = self.config.timestamp().unix_seconds()?;
        Ok(self.config.period() - seconds % self.config.period())
    }
}
