//! HOTP as described by [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3): sign a
//! counter, then extract a 31-bit integer through dynamic truncation.

use crate::{Algorithm, KeyBytes, TotpError};

/// Dynamic truncation of an HMAC digest.
///
/// The low nibble of the last byte selects an offset; the four bytes found there are read as a
/// big-endian integer whose top bit is cleared.
///
/// Returns `None` when the selected bytes run past the end of `digest`. Digests of every
/// [Algorithm](enum.Algorithm.html) are at least 20 bytes long, which always fits.
pub fn truncate(digest: &[u8]) -> Option<u32> {
    let offset = (digest.last()? & 0x0f) as usize;
    let bytes: [u8; 4] = digest.get(offset..offset + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes) & 0x7fff_ffff)
}

/// Compute the truncated HOTP value for `counter`.
pub fn hotp(key: &KeyBytes, counter: u64, algorithm: Algorithm) -> Result<u32, TotpError> {
    let digest = algorithm.sign(key.as_ref(), &counter.to_be_bytes())?;
    truncate(&digest).ok_or(TotpError::Hmac(algorithm))
}

/// Render `value` in base 10 and keep its last `digits` characters.
///
/// No zero padding is added: a value with fewer decimal digits than `digits` is returned
/// whole, so the result may be shorter than requested.
pub fn format_token(value: u32, digits: usize) -> String {
    let decimal = value.to_string();
    let start = decimal.len().saturating_sub(digits);
    decimal[start..].to_owned()
}
