//! Key types with secure memory handling, plus the key hierarchy.
//!
//! All key types automatically zeroize their memory on drop to prevent
//! sensitive data from persisting in memory. A [`MasterKey`] is the root of
//! the hierarchy: subkeys are derived deterministically from it by numeric
//! id and context label, so callers can regenerate them instead of storing
//! them.

use blake2::digest::consts::U32;
use blake2::digest::Mac;
use blake2::Blake2bMac;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use sealpack_common::{Error, Result};

/// Length of symmetric encryption keys in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Fixed width of a subkey derivation context label, in bytes.
///
/// Shorter contexts are zero-padded; longer contexts are rejected.
pub const CONTEXT_LENGTH: usize = 8;

/// Symmetric encryption key.
///
/// Generated fresh per encryption operation or reconstructed from a
/// caller-supplied hex credential segment. Never logged or serialized
/// except as an explicit hex string via [`SymmetricKey::to_hex`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; KEY_LENGTH],
}

impl SymmetricKey {
    /// Generate a random key.
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut key = [0u8; KEY_LENGTH];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    /// Create a key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Create a key from a byte slice, validating its length.
    ///
    /// # Errors
    /// - [`Error::BadKeyLength`] if the slice is not KEY_LENGTH bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LENGTH {
            return Err(Error::BadKeyLength {
                expected: KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(bytes);
        Ok(Self { key })
    }

    /// Create a key from its hex rendering.
    ///
    /// The length is validated before any decoding, so a 63- or
    /// 65-character string fails with [`Error::BadKeyLength`] up front.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != 2 * KEY_LENGTH {
            return Err(Error::BadKeyLength {
                expected: KEY_LENGTH,
                actual: hex_str.len() / 2,
            });
        }
        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::InvalidInput(format!("key is not valid hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Hex rendering of the key, for credential strings.
    pub fn to_hex(&self) -> String {
        hex::encode(self.key)
    }

    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymmetricKey([REDACTED])")
    }
}

/// Master key at the root of the key hierarchy.
///
/// Subkeys are derived from it deterministically; re-deriving with identical
/// `(master_key, id, context)` is bit-for-bit reproducible.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    key: [u8; KEY_LENGTH],
}

impl MasterKey {
    /// Generate a random master key.
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut key = [0u8; KEY_LENGTH];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    /// Create a master key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Create a master key from its hex rendering.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let key = SymmetricKey::from_hex(hex_str)?;
        Ok(Self { key: *key.as_bytes() })
    }

    /// Hex rendering of the master key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.key)
    }

    /// Get the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    /// Derive a subkey from this master key by numeric id and context label.
    ///
    /// Uses keyed Blake2b with the id as salt and the context as
    /// personalization, so distinct `(id, context)` pairs yield independent
    /// subkeys. The derivation is a pure function: no session state, same
    /// inputs, same subkey.
    ///
    /// # Preconditions
    /// - `context` must be at most CONTEXT_LENGTH bytes; shorter contexts
    ///   are zero-padded to the fixed width
    ///
    /// # Errors
    /// - [`Error::ContextTooLong`] if the context exceeds CONTEXT_LENGTH
    pub fn derive_subkey(&self, id: u64, context: &str) -> Result<SymmetricKey> {
        let ctx = context.as_bytes();
        if ctx.len() > CONTEXT_LENGTH {
            return Err(Error::ContextTooLong {
                max: CONTEXT_LENGTH,
                actual: ctx.len(),
            });
        }

        // Blake2b takes 16-byte salt and personalization fields; the id and
        // the padded context occupy their low bytes, as libsodium's kdf does.
        let mut salt = [0u8; 16];
        salt[..8].copy_from_slice(&id.to_le_bytes());
        let mut personal = [0u8; 16];
        personal[..ctx.len()].copy_from_slice(ctx);

        let mac = Blake2bMac::<U32>::new_with_salt_and_personal(&self.key, &salt, &personal)
            .map_err(|e| Error::Crypto(format!("subkey derivation failed: {}", e)))?;

        let digest = mac.finalize().into_bytes();
        let mut subkey = [0u8; KEY_LENGTH];
        subkey.copy_from_slice(&digest);
        Ok(SymmetricKey::from_bytes(subkey))
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keys_differ() {
        let key1 = SymmetricKey::generate();
        let key2 = SymmetricKey::generate();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_key_hex_roundtrip() {
        let key = SymmetricKey::generate();
        let restored = SymmetricKey::from_hex(&key.to_hex()).unwrap();

        assert_eq!(key.as_bytes(), restored.as_bytes());
        assert_eq!(key.to_hex().len(), 2 * KEY_LENGTH);
    }

    #[test]
    fn test_key_from_hex_wrong_length() {
        let key = SymmetricKey::generate();
        let mut short = key.to_hex();
        short.pop();
        let long = format!("{}0", key.to_hex());

        assert!(matches!(
            SymmetricKey::from_hex(&short),
            Err(Error::BadKeyLength { expected: KEY_LENGTH, .. })
        ));
        assert!(matches!(
            SymmetricKey::from_hex(&long),
            Err(Error::BadKeyLength { expected: KEY_LENGTH, .. })
        ));
    }

    #[test]
    fn test_key_from_slice_wrong_length() {
        assert!(matches!(
            SymmetricKey::from_slice(&[0u8; 16]),
            Err(Error::BadKeyLength { expected: KEY_LENGTH, actual: 16 })
        ));
    }

    #[test]
    fn test_derive_subkey_deterministic() {
        let master = MasterKey::from_bytes([7u8; KEY_LENGTH]);

        let sub_a = master.derive_subkey(1, "billing").unwrap();
        let sub_b = master.derive_subkey(1, "billing").unwrap();

        assert_eq!(sub_a.as_bytes(), sub_b.as_bytes());
    }

    #[test]
    fn test_derive_subkey_varies_with_id_and_context() {
        let master = MasterKey::from_bytes([7u8; KEY_LENGTH]);

        let base = master.derive_subkey(1, "billing").unwrap();
        let other_id = master.derive_subkey(2, "billing").unwrap();
        let other_ctx = master.derive_subkey(1, "mailbox").unwrap();

        assert_ne!(base.as_bytes(), other_id.as_bytes());
        assert_ne!(base.as_bytes(), other_ctx.as_bytes());
    }

    #[test]
    fn test_derive_subkey_differs_from_master() {
        let master = MasterKey::from_bytes([7u8; KEY_LENGTH]);
        let sub = master.derive_subkey(0, "").unwrap();

        assert_ne!(sub.as_bytes(), master.as_bytes());
    }

    #[test]
    fn test_derive_subkey_context_too_long() {
        let master = MasterKey::generate();
        let result = master.derive_subkey(1, "much-too-long-context");

        assert!(matches!(
            result,
            Err(Error::ContextTooLong { max: CONTEXT_LENGTH, actual: 21 })
        ));
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let key = SymmetricKey::generate();
        let master = MasterKey::generate();

        assert_eq!(format!("{:?}", key), "SymmetricKey([REDACTED])");
        assert_eq!(format!("{:?}", master), "MasterKey([REDACTED])");
    }
}
