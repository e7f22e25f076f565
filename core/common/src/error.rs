//! Error types for sealpack operations.

use thiserror::Error;

/// Top-level error type for sealpack operations.
///
/// Every failure is reported to the immediate caller with a specific kind
/// and the relevant context (offending tag, length, value). Nothing is a
/// silent no-op, and authentication failures never yield partial plaintext.
#[derive(Debug, Error)]
pub enum Error {
    /// A null value was given where a concrete value is required.
    #[error("value is null; null values cannot be classified or encrypted")]
    NullValue,

    /// A decoded envelope carried a type tag outside the known set.
    ///
    /// Carries the offending tag and the raw payload bytes for diagnostics.
    #[error("unknown type tag `{tag}` in envelope ({} payload bytes)", .data.len())]
    UnknownType { tag: String, data: Vec<u8> },

    /// A `message`-typed payload did not contain valid JSON.
    #[error("malformed message payload: {0}")]
    MalformedMessage(String),

    /// Envelope bytes were truncated or structurally invalid.
    #[error("invalid envelope encoding: {0}")]
    EnvelopeDecode(String),

    /// A caller-supplied key has the wrong length.
    #[error("bad key length: expected {expected} bytes, got {actual}")]
    BadKeyLength { expected: usize, actual: usize },

    /// A stream header has the wrong length.
    #[error("bad header length: expected {expected} bytes, got {actual}")]
    BadHeader { expected: usize, actual: usize },

    /// Ciphertext failed its integrity check: tampering, a wrong key or
    /// header, or a truncated/reordered stream.
    #[error("ciphertext failed authentication")]
    Authentication,

    /// An operation was attempted on a finalized stream session.
    #[error("stream session is already finalized")]
    SessionClosed,

    /// A subkey derivation context exceeds the fixed context width.
    #[error("derivation context is {actual} bytes, maximum is {max}")]
    ContextTooLong { max: usize, actual: usize },

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Cryptographic operation failed.
    #[error("cryptographic error: {0}")]
    Crypto(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
