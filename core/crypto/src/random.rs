//! Random string generation.

use rand::RngCore;

/// Generate a random lowercase-hex string of exactly `length` characters.
///
/// Drawn from the thread-local CSPRNG. A full byte of entropy backs each
/// output character, so truncating the hex rendering loses nothing.
pub fn random_string(length: usize) -> String {
    let mut buf = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut buf);
    let mut rendered = hex::encode(buf);
    rendered.truncate(length);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_length() {
        for length in [0, 1, 7, 64, 101] {
            assert_eq!(random_string(length).len(), length);
        }
    }

    #[test]
    fn test_hex_charset() {
        let s = random_string(256);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_outputs_differ() {
        assert_ne!(random_string(32), random_string(32));
    }
}
