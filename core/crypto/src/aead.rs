//! Incremental authenticated encryption using XChaCha20-Poly1305.
//!
//! Built on the STREAM construction: a session is bound to one key and one
//! random 19-byte header, and every chunk is sealed under a rolling nonce
//! that encodes the chunk position and a last-chunk flag. Reordering,
//! dropping, or truncating chunks therefore fails authentication on the
//! pull side, and a stream is only complete once its FINAL chunk verifies.

use ::aead::stream::{DecryptorBE32, EncryptorBE32};
use chacha20poly1305::{
    aead::{generic_array::GenericArray, KeyInit},
    XChaCha20Poly1305,
};

use crate::keys::KEY_LENGTH;
use sealpack_common::{Error, Result};

/// Stream header size in bytes: the XChaCha20-Poly1305 nonce (24 bytes)
/// minus the 4-byte chunk counter and 1-byte last-chunk flag.
pub const HEADER_LENGTH: usize = 19;

/// Authentication tag size (16 bytes), the minimum ciphertext overhead per
/// chunk. Each chunk additionally carries a one-byte tag marker.
pub const TAG_SIZE: usize = 16;

/// Chunk tag: whether more chunks follow or the stream ends here.
///
/// The marker byte travels in front of each ciphertext chunk, but it is not
/// merely advisory: it selects the nonce finalization flag on the pull side,
/// so a flipped marker fails authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// More chunks follow.
    Message,
    /// Last chunk; authenticates end-of-stream so truncation is detected.
    Final,
}

impl Tag {
    /// Wire marker for this tag.
    pub const fn byte(self) -> u8 {
        match self {
            Tag::Message => 0x00,
            Tag::Final => 0x03,
        }
    }

    /// Parse a wire marker.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Tag::Message),
            0x03 => Some(Tag::Final),
            _ => None,
        }
    }
}

fn cipher_for(key: &[u8]) -> Result<XChaCha20Poly1305> {
    if key.len() != KEY_LENGTH {
        return Err(Error::BadKeyLength {
            expected: KEY_LENGTH,
            actual: key.len(),
        });
    }
    Ok(XChaCha20Poly1305::new(GenericArray::from_slice(key)))
}

/// Encrypt-side session state.
///
/// Consumed by the FINAL chunk; any push after that fails with
/// [`Error::SessionClosed`].
pub struct PushState {
    inner: Option<EncryptorBE32<XChaCha20Poly1305>>,
}

impl PushState {
    /// Encrypt the next chunk.
    ///
    /// # Postconditions
    /// - Returns `marker_byte || aead_ciphertext`, where the ciphertext is
    ///   chunk length + TAG_SIZE bytes
    /// - A FINAL tag consumes the session
    ///
    /// # Errors
    /// - [`Error::SessionClosed`] if a FINAL chunk was already pushed
    pub fn push(&mut self, chunk: &[u8], tag: Tag) -> Result<Vec<u8>> {
        let ciphertext = match tag {
            Tag::Message => {
                let encryptor = self.inner.as_mut().ok_or(Error::SessionClosed)?;
                encryptor.encrypt_next(chunk)
            }
            Tag::Final => {
                let encryptor = self.inner.take().ok_or(Error::SessionClosed)?;
                encryptor.encrypt_last(chunk)
            }
        }
        .map_err(|_| Error::Crypto("chunk encryption failed".to_string()))?;

        let mut framed = Vec::with_capacity(1 + ciphertext.len());
        framed.push(tag.byte());
        framed.extend_from_slice(&ciphertext);
        Ok(framed)
    }

    /// Whether the FINAL chunk has been pushed.
    pub fn is_finalized(&self) -> bool {
        self.inner.is_none()
    }
}

/// Decrypt-side session state.
pub struct PullState {
    inner: Option<DecryptorBE32<XChaCha20Poly1305>>,
}

impl PullState {
    /// Decrypt the next chunk, returning the plaintext and its tag.
    ///
    /// Chunks must arrive in the exact order they were pushed; a reordered,
    /// dropped, or tampered chunk fails authentication.
    ///
    /// # Errors
    /// - [`Error::SessionClosed`] after the FINAL chunk has been pulled
    /// - [`Error::Authentication`] on a truncated chunk, an unknown marker,
    ///   or an integrity failure
    pub fn pull(&mut self, chunk: &[u8]) -> Result<(Vec<u8>, Tag)> {
        if self.inner.is_none() {
            return Err(Error::SessionClosed);
        }
        if chunk.len() < 1 + TAG_SIZE {
            return Err(Error::Authentication);
        }
        let tag = match Tag::from_byte(chunk[0]) {
            Some(tag) => tag,
            None => return Err(Error::Authentication),
        };

        let plaintext = match tag {
            Tag::Message => {
                let decryptor = self.inner.as_mut().ok_or(Error::SessionClosed)?;
                decryptor.decrypt_next(&chunk[1..])
            }
            Tag::Final => {
                let decryptor = self.inner.take().ok_or(Error::SessionClosed)?;
                decryptor.decrypt_last(&chunk[1..])
            }
        }
        .map_err(|_| Error::Authentication)?;

        Ok((plaintext, tag))
    }

    /// Whether the FINAL chunk has been pulled.
    pub fn is_finalized(&self) -> bool {
        self.inner.is_none()
    }
}

/// Start an encrypt-side session bound to `key`.
///
/// # Postconditions
/// - The returned header is freshly random per invocation, never derived
///   from the key or plaintext, and must accompany the ciphertext to the
///   matching [`init_pull`]
///
/// # Errors
/// - [`Error::BadKeyLength`] if the key is not KEY_LENGTH bytes
pub fn init_push(key: &[u8]) -> Result<(PushState, [u8; HEADER_LENGTH])> {
    use rand::RngCore;

    let cipher = cipher_for(key)?;
    let mut header = [0u8; HEADER_LENGTH];
    rand::thread_rng().fill_bytes(&mut header);

    let inner = EncryptorBE32::from_aead(cipher, GenericArray::from_slice(&header));
    Ok((PushState { inner: Some(inner) }, header))
}

/// Start a decrypt-side session from a key and the header produced by
/// [`init_push`].
///
/// # Errors
/// - [`Error::BadKeyLength`] if the key is not KEY_LENGTH bytes
/// - [`Error::BadHeader`] if the header is not HEADER_LENGTH bytes
pub fn init_pull(key: &[u8], header: &[u8]) -> Result<PullState> {
    let cipher = cipher_for(key)?;
    if header.len() != HEADER_LENGTH {
        return Err(Error::BadHeader {
            expected: HEADER_LENGTH,
            actual: header.len(),
        });
    }

    let inner = DecryptorBE32::from_aead(cipher, GenericArray::from_slice(header));
    Ok(PullState { inner: Some(inner) })
}

/// Encrypt a whole message in one call: `init_push` plus a single FINAL
/// chunk. Returns the ciphertext and the session header.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; HEADER_LENGTH])> {
    let (mut state, header) = init_push(key)?;
    let ciphertext = state.push(plaintext, Tag::Final)?;
    Ok((ciphertext, header))
}

/// Decrypt a whole message sealed by [`seal`].
///
/// # Postconditions
/// - Either the full message is returned verified, or no message at all
///
/// # Errors
/// - [`Error::Authentication`] if the ciphertext was tampered with, the
///   key/header pair is wrong, or the message does not carry the FINAL tag
pub fn open(key: &[u8], header: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let mut state = init_pull(key, header)?;
    let (plaintext, tag) = state.pull(ciphertext)?;
    if tag != Tag::Final {
        // A lone MESSAGE chunk authenticates but does not terminate the
        // stream; an unterminated message is incomplete, not valid.
        return Err(Error::Authentication);
    }
    Ok(plaintext)
}
