//! Decoding of base32 shared secrets into raw key bytes.
//!
//! Keys follow [rfc-4648](https://www.rfc-editor.org/rfc/rfc4648#section-6): the alphabet is
//! `A-Z2-7`, lowercase input is accepted, and any number of trailing `=` is ignored.
//!
//! # Examples
//!
//! ```
//! use totp_token::KeyBytes;
//!
//! let padded = KeyBytes::from_base32("ci2fm6eqci2fm6eqku======").unwrap();
//! let bare = KeyBytes::from_base32("CI2FM6EQCI2FM6EQKU").unwrap();
//! assert_eq!(padded, bare);
//! assert_eq!(bare.to_string(), "1234567890123456789055");
//! ```

use base32::{self, Alphabet};

use constant_time_eq::constant_time_eq;

use crate::TotpError;

const ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

/// Raw key material decoded from a base32 secret.
#[derive(Clone, Eq)]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub struct KeyBytes(Vec<u8>);

impl KeyBytes {
    /// Decode a base32 key. See [decode](fn.decode.html).
    pub fn from_base32(key: &str) -> Result<Self, TotpError> {
        decode(key)
    }

    /// Number of decoded bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for KeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for KeyBytes {
    fn from(bytes: Vec<u8>) -> Self {
        KeyBytes(bytes)
    }
}

impl PartialEq for KeyBytes {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBytes")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// Lowercase hex, the form HMAC keys are usually shown in.
impl std::fmt::Display for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Check that `key` is a usable base32 secret and return it uppercased, without padding.
///
/// # Errors
///
/// - [TotpError::EmptyKey](enum.TotpError.html#variant.EmptyKey) for the empty string
/// - [TotpError::InvalidKey](enum.TotpError.html#variant.InvalidKey) when nothing is left once
///   padding is stripped, or when a character falls outside `A-Z2-7`
pub fn validate(key: &str) -> Result<String, TotpError> {
    let key = key.to_ascii_uppercase();
    if key.is_empty() {
        return Err(TotpError::EmptyKey);
    }
    let symbols = key.trim_end_matches('=');
    if symbols.is_empty() || !symbols.bytes().all(|c| matches!(c, b'A'..=b'Z' | b'2'..=b'7')) {
        return Err(TotpError::InvalidKey);
    }
    Ok(symbols.to_owned())
}

/// Decode a base32 secret into key bytes.
///
/// Every symbol contributes 5 bits; bits are regrouped into bytes from the start and a
/// trailing group shorter than 8 bits is dropped, so the output holds
/// `5 * symbols / 8` bytes.
pub fn decode(key: &str) -> Result<KeyBytes, TotpError> {
    let symbols = validate(key)?;
    base32::decode(ALPHABET, &symbols)
        .map(KeyBytes)
        .ok_or(TotpError::InvalidKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE32: &str = "JBSWY3DPEHPK3PXP";
    const BYTES: [u8; 10] = [0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x21, 0xde, 0xad, 0xbe, 0xef];

    #[test]
    fn decodes_known_key() {
        let key = decode(BASE32).unwrap();
        assert_eq!(key.as_ref(), &BYTES);
        assert_eq!(key.to_string(), "48656c6c6f21deadbeef");
    }

    #[test]
    fn decode_ignores_case_and_padding() {
        let padded = decode("ci2fm6eqci2fm6eqku======").unwrap();
        let bare = decode("CI2FM6EQCI2FM6EQKU").unwrap();
        assert_eq!(padded, bare);
        assert_eq!(bare.len(), 11);
    }

    #[test]
    fn decode_drops_partial_bits() {
        // 18 symbols carry 90 bits, only 88 of them form whole bytes.
        assert_eq!(decode("CI2FM6EQCI2FM6EQKU").unwrap().len(), 18 * 5 / 8);
        assert_eq!(decode("A").unwrap().len(), 0);
        assert_eq!(decode("AB").unwrap().as_ref(), &[0x00]);
        assert_eq!(decode("77").unwrap().as_ref(), &[0xff]);
    }

    #[test]
    fn empty_key() {
        assert_eq!(decode(""), Err(TotpError::EmptyKey));
    }

    #[test]
    fn invalid_keys() {
        for key in ["1", "8", "ABC!", "AB=CD", "====", "JBSWY3DP EHPK3PXP", "é"] {
            assert_eq!(decode(key), Err(TotpError::InvalidKey), "{key}");
        }
    }

    #[test]
    fn validate_normalizes() {
        assert_eq!(validate("jbswy3dp==").unwrap(), "JBSWY3DP");
    }

    #[test]
    fn debug_hides_bytes() {
        let key = decode(BASE32).unwrap();
        assert_eq!(format!("{:?}", key), "KeyBytes { len: 10, .. }");
    }
}
