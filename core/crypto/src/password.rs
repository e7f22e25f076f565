//! Password hashing using Argon2id.
//!
//! Argon2id is a memory-hard password hashing function that provides
//! resistance to both GPU and time-memory trade-off attacks. Hashes are
//! emitted as self-describing PHC strings, so verification needs no side
//! channel for parameters or salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use sealpack_common::{Error, Result};

/// Cost parameters for Argon2id password hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordParams {
    /// Memory cost in KiB (e.g., 65536 = 64 MiB).
    pub memory_cost: u32,
    /// Number of iterations.
    pub time_cost: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl PasswordParams {
    /// Parameters suitable for interactive use.
    ///
    /// These parameters provide a balance between security and usability,
    /// targeting approximately 0.5-1 second of hashing time.
    pub fn interactive() -> Self {
        Self {
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }

    /// Higher-cost parameters for sensitive credentials.
    pub fn sensitive() -> Self {
        Self {
            memory_cost: 262144, // 256 MiB
            time_cost: 4,
            parallelism: 4,
        }
    }

    /// Moderate parameters for constrained devices.
    pub fn moderate() -> Self {
        Self {
            memory_cost: 32768, // 32 MiB
            time_cost: 3,
            parallelism: 2,
        }
    }
}

impl Default for PasswordParams {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Hash a password into a self-describing PHC string with a fresh salt.
///
/// Uses [`PasswordParams::interactive`] costs. The returned hash is
/// verified against the input before being handed out, so a corrupted
/// hashing round can never produce an unverifiable credential.
///
/// # Errors
/// - Returns error if the password is empty
/// - Returns error if hashing or the self-check fails
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with(&PasswordParams::default(), password)
}

/// Hash a password with explicit cost parameters.
///
/// # Postconditions
/// - Two calls with the same password yield different strings (random
///   salt), yet both verify against the password
pub fn hash_password_with(params: &PasswordParams, password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(Error::InvalidInput("password cannot be empty".to_string()));
    }

    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| Error::Crypto(format!("invalid password hashing parameters: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Crypto(format!("password hashing failed: {}", e)))?
        .to_string();

    if !verify_password(password, &hash)? {
        return Err(Error::Crypto(
            "freshly created password hash failed verification".to_string(),
        ));
    }

    Ok(hash)
}

/// Verify a password against a PHC hash string.
///
/// A wrong password is `Ok(false)`; a structurally invalid hash string is
/// an error, since it can never have been produced by [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| Error::InvalidInput(format!("malformed password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Crypto(format!("password verification failed: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_params() -> PasswordParams {
        // Low-cost parameters so tests stay fast.
        PasswordParams {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with(&test_params(), "L0NG4NDH4RDP455").unwrap();

        assert!(verify_password("L0NG4NDH4RDP455", &hash).unwrap());
        assert!(!verify_password("5KR1P7K1DD13Z", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let params = test_params();
        let hash1 = hash_password_with(&params, "same password").unwrap();
        let hash2 = hash_password_with(&params, "same password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("same password", &hash1).unwrap());
        assert!(verify_password("same password", &hash2).unwrap());
    }

    #[test]
    fn test_hash_is_phc_string() {
        let hash = hash_password_with(&test_params(), "pw").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_empty_password_fails() {
        assert!(hash_password_with(&test_params(), "").is_err());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("pw", "not-a-phc-string").is_err());
    }
}
