//! Typed envelope encryption facade.
//!
//! This crate is the public surface of sealpack. It captures a value's
//! semantic type so decryption reconstructs the original type exactly,
//! seals the typed envelope with authenticated encryption under a fresh or
//! caller-supplied key, and exposes stream sessions for payloads too large
//! to hold in memory. The companion credential string, `hex(key)|hex(header)`,
//! is everything a holder needs to decrypt.
//!
//! ```no_run
//! use sealpack_envelope::{decrypt, encrypt, TypedValue};
//!
//! # fn main() -> sealpack_common::Result<()> {
//! let sealed = encrypt(&TypedValue::from("a private note"))?;
//! let value = decrypt(&sealed.ciphertext, &sealed.credential.to_string())?;
//! assert_eq!(value, TypedValue::from("a private note"));
//! # Ok(())
//! # }
//! ```
//!
//! Streaming mode operates on raw byte chunks only; type metadata is the
//! caller's responsibility there.

pub mod credential;
pub mod format;
pub mod typed;

use tracing::debug;

use sealpack_crypto::aead;

pub use credential::{Credential, CREDENTIAL_LENGTH};
pub use format::Envelope;
pub use typed::{SemanticType, TypedValue};

pub use sealpack_common::{Error, Result};
pub use sealpack_crypto::{
    derive_public_key, generate_keypair, hash, hash_password, hash_password_with, init_pull,
    init_push, open, random_string, seal, sign, verify, verify_password, DecryptStream,
    EncryptStream, Keypair, MasterKey, PasswordParams, PullState, PushState, StreamChunk,
    SymmetricKey, Tag, CONTEXT_LENGTH, HEADER_LENGTH, KEY_LENGTH,
};

/// Ciphertext together with the credential needed to decrypt it.
pub struct Encrypted {
    /// The authenticated ciphertext.
    pub ciphertext: Vec<u8>,
    /// The secret `key|header` handle for [`decrypt`].
    pub credential: Credential,
}

/// Encrypt a typed value under a freshly generated key.
///
/// The value is classified, encoded to its canonical bytes, wrapped in a
/// self-describing envelope, and sealed in one authenticated message.
pub fn encrypt(value: &TypedValue) -> Result<Encrypted> {
    let key = SymmetricKey::generate();
    encrypt_under(&key, value)
}

/// Encrypt a typed value under a caller-supplied hex key.
///
/// Only a fresh header is generated; the credential's key segment equals
/// the supplied hex. The key length is validated before any cryptographic
/// work.
pub fn encrypt_with_key(key_hex: &str, value: &TypedValue) -> Result<Encrypted> {
    let key = SymmetricKey::from_hex(key_hex)?;
    encrypt_under(&key, value)
}

fn encrypt_under(key: &SymmetricKey, value: &TypedValue) -> Result<Encrypted> {
    debug!(kind = %value.kind(), "sealing typed value");
    let serialized = Envelope::from_value(value)?.serialize()?;
    let (ciphertext, header) = aead::seal(key.as_bytes(), &serialized)?;
    Ok(Encrypted {
        ciphertext,
        credential: Credential::from_parts(key, &header),
    })
}

/// Decrypt a ciphertext with its credential string, reconstructing the
/// original typed value exactly.
///
/// # Errors
/// Each stage's failure propagates with its specific kind: credential
/// parsing ([`Error::BadKeyLength`]/[`Error::BadHeader`]), authentication
/// ([`Error::Authentication`]), envelope structure
/// ([`Error::EnvelopeDecode`]/[`Error::UnknownType`]), and value decoding
/// ([`Error::MalformedMessage`]).
pub fn decrypt(ciphertext: &[u8], credential: &str) -> Result<TypedValue> {
    let credential = Credential::parse(credential)?;
    let key = credential.key()?;
    let header = credential.header()?;

    let serialized = aead::open(key.as_bytes(), &header, ciphertext)?;
    let envelope = Envelope::parse(&serialized)?;
    debug!(kind = %envelope.kind, "opened typed value");
    envelope.into_value()
}

/// Open an encrypting stream session under a caller-supplied hex key.
///
/// Returns the session and its full credential up front: the header must
/// reach the decoder out-of-band before ciphertext chunks are useful, so
/// no chunk should be fed until the credential has been handed off.
pub fn encrypt_stream(key_hex: &str) -> Result<(EncryptStream, Credential)> {
    let key = SymmetricKey::from_hex(key_hex)?;
    let (session, header) = EncryptStream::open(key.as_bytes())?;
    debug!("encrypt stream session opened");
    Ok((session, Credential::from_parts(&key, &header)))
}

/// Open a decrypting stream session from a hex key and the hex header
/// produced by the matching [`encrypt_stream`].
pub fn decrypt_stream(key_hex: &str, header_hex: &str) -> Result<DecryptStream> {
    let key = SymmetricKey::from_hex(key_hex)?;
    let header = credential::decode_header_hex(header_hex)?;
    debug!("decrypt stream session opened");
    DecryptStream::open(key.as_bytes(), &header)
}

/// Produce a detached hex signature over a value's canonical encoding.
pub fn sign_value(secret_hex: &str, value: &TypedValue) -> Result<String> {
    sign(secret_hex, &value.encode()?)
}

/// Verify a detached signature over a value's canonical encoding.
pub fn verify_value(signature_hex: &str, value: &TypedValue, public_hex: &str) -> Result<bool> {
    verify(signature_hex, &value.encode()?, public_hex)
}
