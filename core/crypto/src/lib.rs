//! Cryptographic engine for sealpack.
//!
//! This crate provides:
//! - Whole-message and incremental authenticated encryption using
//!   XChaCha20-Poly1305 with the STREAM construction
//! - A deterministic key hierarchy (master key plus Blake2b-derived subkeys)
//! - Password hashing using Argon2id with self-describing PHC strings
//! - Detached Ed25519 signatures
//! - Generic Blake2b hashing and random string generation
//!
//! # Security Guarantees
//! - All key material is automatically zeroized on drop
//! - No plaintext or key material is ever logged
//! - Authentication failures yield no plaintext, partial or otherwise

pub mod aead;
pub mod hash;
pub mod keys;
pub mod password;
pub mod random;
pub mod sign;
pub mod stream;

pub use self::aead::{init_pull, init_push, open, seal, PullState, PushState, Tag, HEADER_LENGTH};
pub use hash::hash;
pub use keys::{MasterKey, SymmetricKey, CONTEXT_LENGTH, KEY_LENGTH};
pub use password::{hash_password, hash_password_with, verify_password, PasswordParams};
pub use random::random_string;
pub use sign::{derive_public_key, generate_keypair, sign, verify, Keypair};
pub use stream::{DecryptStream, EncryptStream, StreamChunk};
