//! Detached Ed25519 signatures.
//!
//! Keys and signatures cross the API boundary as hex strings, matching the
//! credential conventions used elsewhere in the facade.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH};

use sealpack_common::{Error, Result};

/// An Ed25519 keypair rendered as hex strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    /// Hex-encoded 32-byte public key.
    pub public: String,
    /// Hex-encoded 32-byte secret key.
    pub secret: String,
}

/// Generate a signing keypair, optionally from a 32-byte seed.
///
/// # Postconditions
/// - With a seed, the result is deterministic; without, it is random
///
/// # Errors
/// - [`Error::BadKeyLength`] if a seed is given and is not 32 bytes
pub fn generate_keypair(seed: Option<&[u8]>) -> Result<Keypair> {
    let signing_key = match seed {
        Some(seed) => {
            let bytes: [u8; SECRET_KEY_LENGTH] =
                seed.try_into().map_err(|_| Error::BadKeyLength {
                    expected: SECRET_KEY_LENGTH,
                    actual: seed.len(),
                })?;
            SigningKey::from_bytes(&bytes)
        }
        None => SigningKey::generate(&mut rand::rngs::OsRng),
    };

    Ok(Keypair {
        public: hex::encode(signing_key.verifying_key().as_bytes()),
        secret: hex::encode(signing_key.to_bytes()),
    })
}

fn signing_key_from_hex(secret_hex: &str) -> Result<SigningKey> {
    if secret_hex.len() != 2 * SECRET_KEY_LENGTH {
        return Err(Error::BadKeyLength {
            expected: SECRET_KEY_LENGTH,
            actual: secret_hex.len() / 2,
        });
    }
    let bytes = hex::decode(secret_hex)
        .map_err(|e| Error::InvalidInput(format!("secret key is not valid hex: {}", e)))?;
    let bytes: [u8; SECRET_KEY_LENGTH] = bytes
        .try_into()
        .map_err(|_| Error::InvalidInput("secret key has wrong length".to_string()))?;
    Ok(SigningKey::from_bytes(&bytes))
}

/// Recompute the public key for a hex-encoded secret key.
pub fn derive_public_key(secret_hex: &str) -> Result<String> {
    let signing_key = signing_key_from_hex(secret_hex)?;
    Ok(hex::encode(signing_key.verifying_key().as_bytes()))
}

/// Produce a detached signature over `data`, hex-encoded.
pub fn sign(secret_hex: &str, data: &[u8]) -> Result<String> {
    let signing_key = signing_key_from_hex(secret_hex)?;
    let signature = signing_key.sign(data);
    Ok(hex::encode(signature.to_bytes()))
}

/// Verify a detached signature over `data`.
///
/// A valid-but-mismatched signature is `Ok(false)`; structurally invalid
/// keys or signatures are errors.
pub fn verify(signature_hex: &str, data: &[u8], public_hex: &str) -> Result<bool> {
    let public_bytes = hex::decode(public_hex)
        .map_err(|e| Error::InvalidInput(format!("public key is not valid hex: {}", e)))?;
    let public_bytes: [u8; 32] = public_bytes
        .try_into()
        .map_err(|_| Error::InvalidInput("public key must be 32 bytes".to_string()))?;
    let verifying_key = VerifyingKey::from_bytes(&public_bytes)
        .map_err(|e| Error::InvalidInput(format!("invalid public key: {}", e)))?;

    let signature_bytes = hex::decode(signature_hex)
        .map_err(|e| Error::InvalidInput(format!("signature is not valid hex: {}", e)))?;
    let signature_bytes: [u8; 64] = signature_bytes
        .try_into()
        .map_err(|_| Error::InvalidInput("signature must be 64 bytes".to_string()))?;
    let signature = Signature::from_bytes(&signature_bytes);

    Ok(verifying_key.verify(data, &signature).is_ok())
}
