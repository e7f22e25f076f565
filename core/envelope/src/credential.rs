//! Credential strings: the externally visible secret handle.
//!
//! A credential renders as `hex(key)|hex(header)`, always exactly
//! [`CREDENTIAL_LENGTH`] ASCII characters. It is the only sanctioned way
//! key material leaves this library.

use std::fmt;

use sealpack_common::{Error, Result};
use sealpack_crypto::{SymmetricKey, HEADER_LENGTH, KEY_LENGTH};

/// Total credential length: hex key + separator + hex header.
pub const CREDENTIAL_LENGTH: usize = 2 * KEY_LENGTH + 1 + 2 * HEADER_LENGTH;

/// Decode a hex-encoded stream header, validating its length first.
pub fn decode_header_hex(header_hex: &str) -> Result<[u8; HEADER_LENGTH]> {
    if header_hex.len() != 2 * HEADER_LENGTH {
        return Err(Error::BadHeader {
            expected: HEADER_LENGTH,
            actual: header_hex.len() / 2,
        });
    }
    let bytes = hex::decode(header_hex)
        .map_err(|e| Error::InvalidInput(format!("header is not valid hex: {}", e)))?;
    let mut header = [0u8; HEADER_LENGTH];
    header.copy_from_slice(&bytes);
    Ok(header)
}

/// The key/header pair required to decrypt a ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key_hex: String,
    header_hex: String,
}

impl Credential {
    /// Build a credential from a key and its session header.
    pub fn from_parts(key: &SymmetricKey, header: &[u8; HEADER_LENGTH]) -> Self {
        Self {
            key_hex: key.to_hex(),
            header_hex: hex::encode(header),
        }
    }

    /// Parse a credential string, splitting on the first `|`.
    ///
    /// Both segments are length-checked before any decoding or
    /// cryptographic work.
    ///
    /// # Errors
    /// - [`Error::InvalidInput`] if the separator is missing
    /// - [`Error::BadKeyLength`] / [`Error::BadHeader`] on wrong segment
    ///   lengths
    pub fn parse(credential: &str) -> Result<Self> {
        let (key_hex, header_hex) = credential.split_once('|').ok_or_else(|| {
            Error::InvalidInput("credential is missing the `|` separator".to_string())
        })?;
        if key_hex.len() != 2 * KEY_LENGTH {
            return Err(Error::BadKeyLength {
                expected: KEY_LENGTH,
                actual: key_hex.len() / 2,
            });
        }
        if header_hex.len() != 2 * HEADER_LENGTH {
            return Err(Error::BadHeader {
                expected: HEADER_LENGTH,
                actual: header_hex.len() / 2,
            });
        }
        Ok(Self {
            key_hex: key_hex.to_string(),
            header_hex: header_hex.to_string(),
        })
    }

    /// Reconstruct the symmetric key.
    pub fn key(&self) -> Result<SymmetricKey> {
        SymmetricKey::from_hex(&self.key_hex)
    }

    /// Reconstruct the session header.
    pub fn header(&self) -> Result<[u8; HEADER_LENGTH]> {
        decode_header_hex(&self.header_hex)
    }

    /// The hex key segment.
    pub fn key_hex(&self) -> &str {
        &self.key_hex
    }

    /// The hex header segment.
    pub fn header_hex(&self) -> &str {
        &self.header_hex
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.key_hex, self.header_hex)
    }
}

// A credential is a secret; Debug must not leak it.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_parse_roundtrip() {
        let key = SymmetricKey::generate();
        let header = [7u8; HEADER_LENGTH];
        let credential = Credential::from_parts(&key, &header);

        let rendered = credential.to_string();
        assert_eq!(rendered.len(), CREDENTIAL_LENGTH);

        let parsed = Credential::parse(&rendered).unwrap();
        assert_eq!(parsed.key().unwrap().as_bytes(), key.as_bytes());
        assert_eq!(parsed.header().unwrap(), header);
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            Credential::parse("deadbeef"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_wrong_key_segment_length() {
        let header_hex = "00".repeat(HEADER_LENGTH);
        let short = format!("{}|{}", "ab".repeat(KEY_LENGTH - 1), header_hex);

        assert!(matches!(
            Credential::parse(&short),
            Err(Error::BadKeyLength { expected: KEY_LENGTH, .. })
        ));
    }

    #[test]
    fn test_wrong_header_segment_length() {
        let key_hex = "ab".repeat(KEY_LENGTH);
        let long = format!("{}|{}", key_hex, "00".repeat(HEADER_LENGTH + 1));

        assert!(matches!(
            Credential::parse(&long),
            Err(Error::BadHeader { expected: HEADER_LENGTH, .. })
        ));
    }

    #[test]
    fn test_debug_redacts() {
        let credential =
            Credential::from_parts(&SymmetricKey::generate(), &[0u8; HEADER_LENGTH]);
        assert_eq!(format!("{:?}", credential), "Credential([REDACTED])");
    }
}
