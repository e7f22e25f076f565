//! Generic fixed-output hashing using Blake2b-256.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Digest length in bytes.
pub const HASH_LENGTH: usize = 32;

/// Hash arbitrary bytes to a hex-encoded Blake2b-256 digest.
pub fn hash(data: &[u8]) -> String {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(hash(b"abc"), hash(b"abc"));
        assert_ne!(hash(b"abc"), hash(b"abd"));
    }

    #[test]
    fn test_hash_length() {
        assert_eq!(hash(b"").len(), 2 * HASH_LENGTH);
    }
}
