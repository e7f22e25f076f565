//! Stream sessions for chunked encryption of large payloads.
//!
//! This module wraps the low-level push/pull primitives in an explicit
//! two-call protocol: `open` yields the session and its header (the
//! handshake value a remote decoder needs before any ciphertext is useful),
//! then repeated `feed` calls process chunks in order. Sessions perform no
//! buffering; the caller drives one chunk at a time and marks exactly one
//! chunk, conventionally the last and possibly empty, as final.
//!
//! A session is single-owner: one producer, one consumer, strictly ordered.
//! An abandoned session is just dropped; a decoder must check
//! [`DecryptStream::is_complete`] before trusting reassembled output, since
//! a stream that never saw its final chunk is incomplete, not done.

use crate::aead::{self, PullState, PushState, Tag, HEADER_LENGTH};
use sealpack_common::{Error, Result};

/// Encrypt-side stream session.
pub struct EncryptStream {
    state: PushState,
}

impl EncryptStream {
    /// Open an encrypting session under `key`.
    ///
    /// # Postconditions
    /// - Returns the session together with its freshly generated header;
    ///   transmit the header out-of-band before any ciphertext chunks
    ///
    /// # Errors
    /// - [`Error::BadKeyLength`] if the key length is wrong
    pub fn open(key: &[u8]) -> Result<(Self, [u8; HEADER_LENGTH])> {
        let (state, header) = aead::init_push(key)?;
        Ok((Self { state }, header))
    }

    /// Encrypt the next chunk, marking it final when `is_final` is set.
    ///
    /// # Errors
    /// - [`Error::SessionClosed`] once a final chunk has been fed
    pub fn feed(&mut self, chunk: &[u8], is_final: bool) -> Result<Vec<u8>> {
        if self.state.is_finalized() {
            return Err(Error::SessionClosed);
        }
        let tag = if is_final { Tag::Final } else { Tag::Message };
        self.state.push(chunk, tag)
    }

    /// Whether the final chunk has been produced.
    pub fn is_finalized(&self) -> bool {
        self.state.is_finalized()
    }
}

/// A decrypted chunk together with its end-of-stream marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
    /// The verified plaintext of this chunk.
    pub plaintext: Vec<u8>,
    /// True when this chunk terminated the stream.
    pub is_final: bool,
}

/// Decrypt-side stream session.
pub struct DecryptStream {
    state: PullState,
}

impl DecryptStream {
    /// Open a decrypting session from `key` and the header produced by the
    /// matching [`EncryptStream::open`].
    ///
    /// # Errors
    /// - [`Error::BadKeyLength`] if the key length is wrong
    /// - [`Error::BadHeader`] if the header length is wrong
    pub fn open(key: &[u8], header: &[u8]) -> Result<Self> {
        let state = aead::init_pull(key, header)?;
        Ok(Self { state })
    }

    /// Decrypt the next ciphertext chunk.
    ///
    /// Chunks must be fed in the exact order they were produced; a
    /// reordered, dropped, or tampered chunk fails authentication and
    /// yields no plaintext.
    ///
    /// # Errors
    /// - [`Error::SessionClosed`] once the final chunk has been consumed
    /// - [`Error::Authentication`] on any integrity failure
    pub fn feed(&mut self, chunk: &[u8]) -> Result<StreamChunk> {
        if self.state.is_finalized() {
            return Err(Error::SessionClosed);
        }
        let (plaintext, tag) = self.state.pull(chunk)?;
        Ok(StreamChunk {
            plaintext,
            is_final: tag == Tag::Final,
        })
    }

    /// Whether the stream terminated with a verified final chunk.
    ///
    /// A conforming decoder must treat a stream for which this is false as
    /// incomplete, never as successfully ended.
    pub fn is_complete(&self) -> bool {
        self.state.is_finalized()
    }
}
